//! Общие аргументы командной строки

use clap::Parser;

/// Общие аргументы для всех CLI команд
#[derive(Parser, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CommonArgs {
    /// Определяет уровень логирования на основе флагов
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Проверяет, нужно ли выводить информацию
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        let args = CommonArgs::default();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        let args = CommonArgs {
            verbose: true,
            quiet: false,
        };
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        let args = CommonArgs {
            verbose: false,
            quiet: true,
        };
        assert_eq!(args.log_level(), tracing::Level::ERROR);
        assert!(!args.should_print());
    }
}
