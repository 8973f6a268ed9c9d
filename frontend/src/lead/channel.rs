use std::future::Future;

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{error, info};
use web_sys::window;

use crate::config;
use crate::lead::error::ChannelError;
use crate::lead::payload::{IntakePayload, MailHandoff};
use crate::lead::pipeline::{IntakeChannel, MailClient};

/// Races `work` against `sleep(timeout_ms)`. Losing the race is a
/// `ChannelError::Timeout`, so a hung request can never keep the form in
/// `Sending`.
pub async fn with_deadline<T, F, S, D>(work: F, sleep: S, timeout_ms: u32) -> Result<T, ChannelError>
where
    F: Future<Output = Result<T, ChannelError>>,
    S: FnOnce(u32) -> D,
    D: Future<Output = ()>,
{
    match select(Box::pin(work), Box::pin(sleep(timeout_ms))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ChannelError::Timeout(timeout_ms)),
    }
}

/// Posts leads to the intake service with gloo-net.
pub struct HttpIntake {
    url: &'static str,
    timeout_ms: u32,
}

impl Default for HttpIntake {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpIntake {
    pub fn new() -> Self {
        HttpIntake {
            url: config::get_intake_url(),
            timeout_ms: config::INTAKE_TIMEOUT_MS,
        }
    }
}

impl IntakeChannel for HttpIntake {
    async fn send(&self, payload: &IntakePayload) -> Result<(), ChannelError> {
        let request = Request::post(self.url)
            .header("Accept", "application/json")
            .json(payload)
            .map_err(|e| ChannelError::Encode(e.to_string()))?;

        info!("Posting lead to {}", self.url);
        let sent = async move {
            let response = request
                .send()
                .await
                .map_err(|e| ChannelError::Network(e.to_string()))?;
            if response.ok() {
                Ok(())
            } else {
                Err(ChannelError::Status(response.status()))
            }
        };

        with_deadline(sent, TimeoutFuture::new, self.timeout_ms).await
    }
}

/// Opens a `mailto:` link in the current window.
pub struct WindowMailClient;

impl MailClient for WindowMailClient {
    fn compose(&self, handoff: &MailHandoff) {
        let Some(window) = window() else {
            error!("No window available to open the mail client");
            return;
        };
        if let Err(e) = window.location().set_href(&handoff.to_uri()) {
            error!("Failed to open mail client: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn hung_request_times_out() {
        let result = block_on(with_deadline(
            pending::<Result<(), ChannelError>>(),
            |_| ready(()),
            15_000,
        ));
        assert_eq!(result, Err(ChannelError::Timeout(15_000)));
    }

    #[test]
    fn sleep_gets_the_configured_timeout() {
        let mut slept = None;
        let result = block_on(with_deadline(
            pending::<Result<(), ChannelError>>(),
            |ms| {
                slept = Some(ms);
                ready(())
            },
            250,
        ));
        assert_eq!(result, Err(ChannelError::Timeout(250)));
        assert_eq!(slept, Some(250));
    }

    #[test]
    fn finished_request_wins_over_pending_deadline() {
        let result = block_on(with_deadline(ready(Ok(7u16)), |_| pending::<()>(), 15_000));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn request_error_passes_through() {
        let result = block_on(with_deadline(
            ready(Err::<(), _>(ChannelError::Status(502))),
            |_| pending::<()>(),
            15_000,
        ));
        assert_eq!(result, Err(ChannelError::Status(502)));
    }

    #[test]
    fn default_intake_uses_configured_endpoint() {
        let intake = HttpIntake::default();
        assert_eq!(intake.url, config::get_intake_url());
        assert_eq!(intake.timeout_ms, config::INTAKE_TIMEOUT_MS);
    }
}
