use crate::domain::TaskScope;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncoURL(String);

impl AsRef<str> for SyncoURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SyncoURL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl SyncoURL {
    /// Creates a new URL rooted at the API base, e.g. `http://127.0.0.1:8000/api`.
    pub fn new(base: &str) -> Self {
        Self(base.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    ///
    /// The backend routes all end with a slash, so one is always kept at the end.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_matches('/');
        Self(format!("{}/{}/", trimmed_url, trimmed_path))
    }

    pub fn with_query(&self, key: &str, value: &str) -> Self {
        if self.0.contains('?') {
            Self(format!("{}&{}={}", self.0, key, value))
        } else {
            Self(format!("{}?{}={}", self.0, key, value))
        }
    }

    pub fn with_scope(&self, scope: &TaskScope) -> Self {
        match scope {
            TaskScope::All => self.clone(),
            TaskScope::Personal => self.with_query("group__isnull", "True"),
            TaskScope::Group(id) => self.with_query("group", &id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupId;

    #[test]
    fn append_path_normalizes_slashes() {
        let url = SyncoURL::new("http://localhost:8000/api/");
        assert_eq!(
            url.append_path("/tasks").as_ref(),
            "http://localhost:8000/api/tasks/"
        );
        assert_eq!(
            url.append_path("tasks/7/").as_ref(),
            "http://localhost:8000/api/tasks/7/"
        );
    }

    #[test]
    fn scope_becomes_query_parameter() {
        let tasks = SyncoURL::new("http://localhost:8000/api").append_path("tasks");

        assert_eq!(
            tasks.with_scope(&TaskScope::All).as_ref(),
            "http://localhost:8000/api/tasks/"
        );
        assert_eq!(
            tasks.with_scope(&TaskScope::Personal).as_ref(),
            "http://localhost:8000/api/tasks/?group__isnull=True"
        );
        assert_eq!(
            tasks.with_scope(&TaskScope::Group(GroupId(3))).as_ref(),
            "http://localhost:8000/api/tasks/?group=3"
        );
    }
}
