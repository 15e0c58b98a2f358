//! Configuration loading and validation

#[cfg(test)]
mod tests {
    use admin_bulk::config::{BulkSettings, Config, QueueBackend};
    use admin_bulk::utils::error::RetryConfig;
    use std::time::Duration;

    const EXAMPLE: &str = include_str!("../../config/admin.yaml.example");

    #[test]
    fn test_example_config_is_valid() {
        let config = Config::from_yaml_str(EXAMPLE).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.server().port, 8000);
        assert_eq!(config.worker().queue, QueueBackend::InProcess);
        assert_eq!(
            config.bulk().for_resource("families"),
            BulkSettings::new(200, 30)
        );
    }

    #[test]
    fn test_unlisted_resource_uses_defaults() {
        let config = Config::from_yaml_str(EXAMPLE).unwrap();
        assert_eq!(
            config.bulk().for_resource("volunteers"),
            config.bulk().defaults
        );
    }

    #[test]
    fn test_empty_document_falls_back_to_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.bulk().defaults, BulkSettings::default());
        assert!(config.worker().embedded);
    }

    #[test]
    fn test_in_process_queue_requires_embedded_worker() {
        let config = Config::from_yaml_str("worker:\n  queue: in_process\n  embedded: false\n")
            .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("embedded"));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let yaml = "bulk:\n  resources:\n    families:\n      max_batch_size: 0\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("families"));
    }

    #[test]
    fn test_retry_settings_convert_to_policy_config() {
        let yaml = "worker:\n  retry:\n    max_retries: 2\n    initial_delay_ms: 200\n    max_delay_ms: 1000\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        let retry = RetryConfig::from(&config.worker().retry);

        assert!(config.validate().is_ok());
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.base_delay, Duration::from_millis(200));
        assert_eq!(retry.max_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_queue_backend_parses_aliases() {
        assert_eq!("redis".parse::<QueueBackend>(), Ok(QueueBackend::Redis));
        assert_eq!("in-process".parse::<QueueBackend>(), Ok(QueueBackend::InProcess));
        assert!("kafka".parse::<QueueBackend>().is_err());
    }
}
