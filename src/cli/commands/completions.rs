//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::SpotterError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, SpotterError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "spotter", &mut buf);
    String::from_utf8(buf).map_err(|e| SpotterError::Config(format!("UTF-8 error: {e}")))
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell) -> Result<String, SpotterError> {
    Ok(generate_completions(shell)?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("spotter"));
        assert!(script.contains("regenerate"));
    }

    #[test]
    fn test_generate_zsh_completions() {
        let script = generate_completions(Shell::Zsh).unwrap();
        assert!(script.contains("#compdef spotter"));
    }
}
