use super::GroupId;

/// Which tasks a list request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskScope {
    /// Personal tasks plus the tasks of every group the user belongs to.
    #[default]
    All,
    /// Tasks without a group.
    Personal,
    Group(GroupId),
}
