use clap::{Parser, Subcommand};
use synco_api::domain::GroupId;

#[derive(Debug, Parser)]
#[command(name = "synco")]
#[command(about = "Terminal client for shared task lists")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured API server (default)
    Run,
    /// Run with local in-memory data, no server needed
    Dev,
    /// Sign in with username and password
    Login,
    /// Create an account, then sign in
    Register,
    /// Remove the stored session
    Logout,
    /// Manage groups
    Groups {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Subcommand)]
pub enum GroupCommands {
    /// List your groups
    List,
    /// Create a group
    Create { name: String },
    /// Rename a group
    Rename { id: GroupId, name: String },
    /// Delete a group and its tasks
    Delete { id: GroupId },
    /// List the members of a group
    Members { id: GroupId },
    /// Add a user to a group
    AddMember { id: GroupId, username: String },
    /// Remove a user from a group
    RemoveMember { id: GroupId, username: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["synco"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn group_ids_are_parsed() {
        let cli = Cli::try_parse_from(["synco", "groups", "add-member", "3", "sam"]).unwrap();
        match cli.command {
            Some(Commands::Groups {
                command: GroupCommands::AddMember { id, username },
            }) => {
                assert_eq!(id, GroupId(3));
                assert_eq!(username, "sam");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(Cli::try_parse_from(["synco", "groups", "delete", "abc"]).is_err());
    }
}
