// MQLSleuth - app/outcome.rs
//
// Overall verdict of a compiler run and the log-file naming convention
// MetaEditor uses for it.

use crate::core::model::{normalize_path, BuildMode, DiagnosticBatch};
use crate::util::constants;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Pass/fail verdict for one compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    pub mode: BuildMode,
    pub success: bool,
    /// Banner line shown after the diagnostics.
    pub banner: &'static str,
}

impl BuildOutcome {
    /// A run succeeds only when the compiler exited with status 0 and the
    /// log reports zero errors. Warnings never fail a run.
    pub fn evaluate(mode: BuildMode, exit_status: i32, batch: &DiagnosticBatch) -> Self {
        let success = exit_status == 0 && batch.total_errors == 0;
        let banner = match (mode, success) {
            (BuildMode::Compile, true) => constants::COMPILE_SUCCESS_BANNER,
            (BuildMode::Compile, false) => constants::COMPILE_FAILURE_BANNER,
            (BuildMode::Syntax, true) => constants::SYNTAX_SUCCESS_BANNER,
            (BuildMode::Syntax, false) => constants::SYNTAX_FAILURE_BANNER,
        };

        tracing::info!(
            %mode,
            exit_status,
            total_errors = batch.total_errors,
            success,
            "Build evaluated"
        );

        Self {
            mode,
            success,
            banner,
        }
    }
}

/// The log file MetaEditor is told to write for `target`: the target's base
/// name up to the first `.`, with a `.log` extension, in the working
/// directory rather than beside the target.
///
/// `Experts/Foo.v2.mq4` -> `Foo.log`.
pub fn log_file_for(target: &Path) -> PathBuf {
    let target = normalize_path(&target.to_string_lossy());
    let file_name = target.rsplit('/').next().unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    PathBuf::from(format!("{stem}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_with_errors(total_errors: usize) -> DiagnosticBatch {
        DiagnosticBatch {
            total_errors,
            total_warnings: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_success_requires_zero_status_and_zero_errors() {
        let ok = BuildOutcome::evaluate(BuildMode::Compile, 0, &batch_with_errors(0));
        assert!(ok.success);
        assert_eq!(ok.banner, "Compilation successful!");

        let errors = BuildOutcome::evaluate(BuildMode::Compile, 0, &batch_with_errors(1));
        assert!(!errors.success);
        assert_eq!(errors.banner, "Failed to compile");

        let status = BuildOutcome::evaluate(BuildMode::Compile, 1, &batch_with_errors(0));
        assert!(!status.success);
    }

    #[test]
    fn test_syntax_banners() {
        let ok = BuildOutcome::evaluate(BuildMode::Syntax, 0, &batch_with_errors(0));
        assert_eq!(ok.banner, "Syntax check successful!");
        let bad = BuildOutcome::evaluate(BuildMode::Syntax, 0, &batch_with_errors(2));
        assert_eq!(bad.banner, "Syntax check failed");
    }

    #[test]
    fn test_log_file_for_strips_every_extension() {
        assert_eq!(
            log_file_for(Path::new("Experts/Foo.v2.mq4")),
            PathBuf::from("Foo.log")
        );
        assert_eq!(
            log_file_for(Path::new(r"MQL4\Experts\Grid.mq4")),
            PathBuf::from("Grid.log")
        );
        assert_eq!(log_file_for(Path::new("Bar.mq4")), PathBuf::from("Bar.log"));
    }
}
