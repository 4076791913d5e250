use std::process::ExitCode;

use crate::Error;

pub fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::InvalidInput { .. } => ExitCode::from(64),
        Error::ParseConfig { .. } => ExitCode::from(65),
        Error::InvalidConfig { .. } => ExitCode::from(65),
        Error::ExplicitConfigMissing { .. } => ExitCode::from(66),
        Error::RegistryMissing { .. } => ExitCode::from(66),
        Error::ExternalCommandFailed { .. } => ExitCode::from(69),
        Error::ContainerMissing { .. } => ExitCode::from(69),
        Error::MigrationHalted { .. } => ExitCode::from(69),
        Error::WorkingDirectoryUnavailable { .. } => ExitCode::from(70),
        Error::AlreadyExists { .. } => ExitCode::from(73),
        Error::CreateDir { .. } => ExitCode::from(73),
        Error::ReadFile { .. } => ExitCode::from(74),
        Error::WriteFile { .. } => ExitCode::from(74),
        Error::ReadConfig { .. } => ExitCode::from(74),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn exit_code_matches_expected_values() {
        assert_eq!(
            exit_code(&Error::InvalidInput {
                message: "bad".into()
            }),
            ExitCode::from(64)
        );
        assert_eq!(
            exit_code(&Error::ParseConfig {
                path: "brokerkit.toml".into(),
                source: toml::from_str::<toml::Value>("invalid").unwrap_err()
            }),
            ExitCode::from(65)
        );
        assert_eq!(
            exit_code(&Error::RegistryMissing {
                path: "kafka-topics.txt".into()
            }),
            ExitCode::from(66)
        );
        assert_eq!(
            exit_code(&Error::ContainerMissing {
                name: "kafka-server".into()
            }),
            ExitCode::from(69)
        );
        assert_eq!(
            exit_code(&Error::ExternalCommandFailed {
                action: "start container".into(),
                message: "exit 1".into()
            }),
            ExitCode::from(69)
        );
        assert_eq!(
            exit_code(&Error::AlreadyExists {
                path: "kafka.rs".into()
            }),
            ExitCode::from(73)
        );
        assert_eq!(
            exit_code(&Error::WriteFile {
                path: "file".into(),
                source: io::Error::new(io::ErrorKind::Other, "err")
            }),
            ExitCode::from(74)
        );
    }
}
