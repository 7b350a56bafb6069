use anyhow::Result;

use crate::api::ApiClient;
use crate::cli::GroupCommands;

pub async fn run_group_command(client: &ApiClient, command: GroupCommands) -> Result<()> {
    match command {
        GroupCommands::List => {
            let groups = client.list_groups().await?;
            if groups.is_empty() {
                println!("No groups.");
            }
            for group in groups {
                println!(
                    "{:>4}  {}  ({} members)",
                    group.id.0,
                    group.name,
                    group.members.len()
                );
            }
        }
        GroupCommands::Create { name } => {
            let group = client.create_group(&name).await?;
            println!("Created group {} ({}).", group.name, group.id);
        }
        GroupCommands::Rename { id, name } => {
            let group = client.rename_group(id, &name).await?;
            println!("Renamed group {} to {}.", group.id, group.name);
        }
        GroupCommands::Delete { id } => {
            client.delete_group(id).await?;
            println!("Deleted group {}.", id);
        }
        GroupCommands::Members { id } => {
            for member in client.list_members(id).await? {
                println!("{}", member);
            }
        }
        GroupCommands::AddMember { id, username } => {
            client.add_member(id, &username).await?;
            println!("Added {} to group {}.", username, id);
        }
        GroupCommands::RemoveMember { id, username } => {
            client.remove_member(id, &username).await?;
            println!("Removed {} from group {}.", username, id);
        }
    }
    Ok(())
}
