use std::{future::Future, str::FromStr};

use buildhook_config::Config;
use sentry::{integrations::debug_images::DebugImagesIntegration, types::Dsn, ClientOptions};
use tracing::{info, warn};

/// Configure Sentry integration by wrapping a function.
pub async fn with_sentry_configuration<T, Fut, E>(config: &Config, func: T) -> Result<(), E>
where
    T: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let _guard = build_client_options(config).map(|options| {
        info!("Sentry integration enabled.");

        // Enable backtraces
        std::env::set_var("RUST_BACKTRACE", "1");
        sentry::init(options)
    });

    func().await
}

fn build_client_options(config: &Config) -> Option<ClientOptions> {
    if config.sentry.url.is_empty() {
        return None;
    }

    let dsn = match Dsn::from_str(&config.sentry.url) {
        Ok(dsn) => dsn,
        Err(e) => {
            warn!(error = %e, message = "Invalid Sentry URL, integration disabled");
            return None;
        }
    };

    let mut options = ClientOptions::new().add_integration(DebugImagesIntegration::default());
    options.dsn = Some(dsn);
    options.default_integrations = true;
    options.in_app_exclude.push("actix");
    options.in_app_exclude.push("sentry");
    options.in_app_exclude.push("tokio");
    options.release = Some(config.version.to_string().into());
    options.attach_stacktrace = true;
    options.traces_sample_rate = config.sentry.traces_sample_rate;
    options.debug = false;

    Some(options)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(url: &str) -> Config {
        let mut config = Config::from_env("1.2.3".into()).unwrap();
        config.sentry.url = url.into();
        config.sentry.traces_sample_rate = 0.5;
        config
    }

    #[test]
    fn disabled_without_url() {
        assert!(build_client_options(&config("")).is_none());
    }

    #[test]
    fn disabled_with_invalid_url() {
        assert!(build_client_options(&config("not a dsn")).is_none());
    }

    #[test]
    fn options_from_config() {
        let options =
            build_client_options(&config("https://public@sentry.example.com/42")).unwrap();

        assert_eq!(options.release.as_deref(), Some("1.2.3"));
        assert_eq!(options.traces_sample_rate, 0.5);
        assert!(options.dsn.is_some());
    }
}
