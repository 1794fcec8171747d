// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use defi_insights_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn store() {
        let err = CoreError::Store("connection refused".into());
        assert_eq!(err.to_string(), "Transaction store error: connection refused");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad float".into());
        assert_eq!(err.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("expected array".into());
        assert_eq!(err.to_string(), "Deserialization error: expected array");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("disk full".into());
        assert_eq!(err.to_string(), "File I/O error: disk full");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            endpoint: "/api/wallets".into(),
            message: "HTTP 503 Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (/api/wallets): HTTP 503 Service Unavailable"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("timeout".into());
        assert_eq!(err.to_string(), "Network error: timeout");
    }

    #[test]
    fn validation() {
        let err = CoreError::Validation("Wallet address is required for logging transaction".into());
        assert_eq!(
            err.to_string(),
            "Transaction validation failed: Wallet address is required for logging transaction"
        );
    }

    #[test]
    fn config() {
        let err = CoreError::Config("INSIGHTS_TIMELINE_LEN must be a non-negative integer".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: INSIGHTS_TIMELINE_LEN must be a non-negative integer"
        );
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "walletdata.json missing");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("walletdata.json missing")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io() {
        fn read_missing() -> Result<Vec<u8>, CoreError> {
            Ok(std::fs::read("/definitely/not/here/walletdata.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
        assert_send_sync::<CoreError>();
    }
}
