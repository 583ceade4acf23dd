//! UseCase: read relay counters.

use std::sync::Arc;

use crate::domain::{RelayStats, SessionRepository};

pub struct GetRelayStatsUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRelayStatsUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> RelayStats {
        self.repository.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Timestamp},
        infrastructure::repository::InMemorySessionRepository,
    };

    #[tokio::test]
    async fn test_stats_counts_sessions() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let alice = repository.admit(Timestamp::new(0)).await;
        repository.admit(Timestamp::new(0)).await;
        repository
            .lock()
            .await
            .registry
            .authenticate(alice, DisplayName::new("alice".to_string()).unwrap())
            .unwrap();
        let usecase = GetRelayStatsUseCase::new(repository);

        // when:
        let stats = usecase.execute().await;

        // then:
        assert_eq!(stats.connections, 2);
        assert_eq!(stats.authenticated, 1);
        assert_eq!(stats.history, 0);
    }
}
