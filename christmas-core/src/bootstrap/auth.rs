//! Authentication initialization

use async_trait::async_trait;
use std::sync::OnceLock;
use tracing::{error, info};

use super::Initializer;
use crate::{config::AuthConfig, service::JwtService, Error, Result};

/// Loads the RS256 key pair and builds the process-wide `JwtService`.
#[derive(Debug)]
pub struct AuthInitializer {
    config: AuthConfig,
    jwt_service: OnceLock<JwtService>,
}

impl AuthInitializer {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            jwt_service: OnceLock::new(),
        }
    }

    /// The token service, once `initialize` has succeeded.
    #[must_use]
    pub fn jwt_service(&self) -> Option<&JwtService> {
        self.jwt_service.get()
    }
}

async fn read_key(path: &str) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| {
        error!("Failed to read key file {}: {}", path, source);
        Error::KeyFile {
            path: path.to_string(),
            source,
        }
    })
}

#[async_trait]
impl Initializer for AuthInitializer {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn initialize(&self) -> Result<()> {
        if self.jwt_service.get().is_some() {
            return Err(Error::AlreadyInitialized("auth"));
        }

        info!(
            private_key = %self.config.private_key_path,
            public_key = %self.config.public_key_path,
            "Loading JWT keys"
        );

        let private_pem = read_key(&self.config.private_key_path).await?;
        let public_pem = read_key(&self.config.public_key_path).await?;

        let service = JwtService::new(&private_pem, &public_pem)?.with_lifetimes(&self.config);

        self.jwt_service
            .set(service)
            .map_err(|_| Error::AlreadyInitialized("auth"))?;

        info!("JWT service initialized");
        Ok(())
    }
}
