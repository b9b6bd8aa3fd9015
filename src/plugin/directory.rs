//! Fixed identity lookup for hosts without a person database.

use std::collections::HashMap;

use async_trait::async_trait;

use super::context::PersonDirectory;

/// Person directory backed by a fixed user-id to name table.
#[derive(Debug, Clone, Default)]
pub struct StaticPersonDirectory {
    names: HashMap<String, String>,
}

impl StaticPersonDirectory {
    /// Creates an empty directory; every lookup yields no name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` for the account `user_id` on `platform`.
    #[must_use]
    pub fn with_person(
        mut self,
        platform: &str,
        user_id: &str,
        name: impl Into<String>,
    ) -> Self {
        self.names
            .insert(person_key(platform, user_id), name.into());
        self
    }
}

fn person_key(platform: &str, user_id: &str) -> String {
    format!("{platform}:{user_id}")
}

#[async_trait]
impl PersonDirectory for StaticPersonDirectory {
    fn person_id(&self, platform: &str, user_id: &str) -> String {
        person_key(platform, user_id)
    }

    async fn person_name(&self, person_id: &str) -> Option<String> {
        self.names.get(person_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::StaticPersonDirectory;
    use crate::plugin::PersonDirectory;

    #[tokio::test]
    async fn resolves_registered_people_only() {
        let directory = StaticPersonDirectory::new().with_person("qq", "10001", "小明");

        let known = directory.person_id("qq", "10001");
        let unknown = directory.person_id("qq", "10002");

        assert_eq!(directory.person_name(&known).await.as_deref(), Some("小明"));
        assert_eq!(directory.person_name(&unknown).await, None);
    }
}
