//! Application wiring and the single-attempt run loop.

use std::sync::Arc;

use tracing::{error, info, warn};

use xswap_api::SwapApiClient;
use xswap_chain::{Erc20Approver, KeySource, Wallet};
use xswap_coordinator::{SwapCoordinator, SwapReport, SwapState};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Main application: wires the collaborators and runs one swap attempt.
pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run one swap attempt end to end and report its outcome.
    ///
    /// A stage failure is a reported outcome, not an application error;
    /// only startup problems (keys, config, client construction) return
    /// `Err`.
    pub async fn run(&self) -> AppResult<SwapReport> {
        let wallet = Wallet::load(
            KeySource::EnvVar {
                var_name: self.config.chain.private_key_env.clone(),
            },
            self.config.expected_address()?,
        )?;
        info!(maker = %wallet.address(), "Wallet loaded");

        let auth_key = std::env::var(&self.config.api.auth_key_env).map_err(|_| {
            AppError::Config(format!(
                "API key environment variable {} is not set",
                self.config.api.auth_key_env
            ))
        })?;

        let approver = Arc::new(Erc20Approver::new(&self.config.chain.rpc_url, &wallet));
        let client = Arc::new(SwapApiClient::new(&self.config.api.base_url, auth_key)?);

        let swap_config = self.config.swap_config(wallet.address())?;
        let coordinator =
            SwapCoordinator::new(swap_config, approver, client.clone(), client)?;

        let report = coordinator.run().await;
        self.log_report(&report);
        Ok(report)
    }

    fn log_report(&self, report: &SwapReport) {
        match report.state {
            SwapState::Submitted => {
                if let Some(created) = &report.created {
                    info!(
                        order_hash = %created.hash,
                        quote_id = %created.quote_id,
                        "Swap order submitted"
                    );
                }
            }
            SwapState::SubmitFailed => {
                // The order may exist server-side without having been
                // submitted; hand the operator its identifiers.
                if let Some(created) = &report.created {
                    warn!(
                        order_hash = %created.hash,
                        quote_id = %created.quote_id,
                        "Order was created but not submitted; check for an orphaned order server-side"
                    );
                }
                self.log_failure(report);
            }
            _ => self.log_failure(report),
        }
    }

    fn log_failure(&self, report: &SwapReport) {
        if let Some(err) = &report.error {
            match err.remote_payload() {
                Some(payload) => {
                    error!(state = %report.state, %err, payload = %payload, "Swap attempt failed")
                }
                None => error!(state = %report.state, %err, "Swap attempt failed"),
            }
        }
    }
}
