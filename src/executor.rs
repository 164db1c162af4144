//! The command execution collaborator
//!
//! Panels never compute their own text: they hand a command string to an
//! [`Executor`] and show whatever comes back. The executor also owns the
//! shared "current offset" that address-aware panels follow.

use crate::config::ExecutorConfig;
use std::process::Command;
use tracing::{debug, warn};

/// Answers panel commands and tracks the shared offset
pub trait Executor {
    /// Run `cmd` and return its text output
    fn execute(&mut self, cmd: &str) -> String;

    fn offset(&self) -> u64;

    fn seek(&mut self, addr: u64);

    /// Size of the instruction ending right before `addr`
    fn prev_op_size(&mut self, _addr: u64) -> Option<u64> {
        None
    }

    /// Size of the instruction at `addr`
    fn op_size(&mut self, _addr: u64) -> Option<u64> {
        None
    }

    /// Name of the function containing `addr`
    fn function_at(&mut self, _addr: u64) -> Option<String> {
        None
    }

    fn stack_base(&mut self) -> u64 {
        0
    }

    fn program_counter(&mut self) -> Option<u64> {
        None
    }

    /// Select one of the disassembly display modes
    fn disasm_mode(&mut self, _mode: usize) {}

    /// Color themes offered by the Colors menu
    fn themes(&mut self) -> Vec<String> {
        Vec::new()
    }

    fn apply_theme(&mut self, _name: &str) {}
}

/// Runs each command through an external program.
///
/// The command is appended to the configured arguments, or substituted for
/// a `{cmd}` placeholder when one is present. `{offset}` expands to the
/// current offset in hex, which is also exported as `PANEDECK_OFFSET`.
#[derive(Debug)]
pub struct ShellExecutor {
    program: String,
    args: Vec<String>,
    offset: u64,
    disasm_mode: usize,
}

impl ShellExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        ShellExecutor {
            program: config.program.clone(),
            args: config.args.clone(),
            offset: 0,
            disasm_mode: 0,
        }
    }

    fn build_args(&self, cmd: &str) -> Vec<String> {
        let offset = format!("0x{:x}", self.offset);
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains("{cmd}") {
                    substituted = true;
                }
                arg.replace("{cmd}", cmd).replace("{offset}", &offset)
            })
            .collect();
        if !substituted {
            args.push(cmd.to_string());
        }
        args
    }
}

impl Executor for ShellExecutor {
    fn execute(&mut self, cmd: &str) -> String {
        let args = self.build_args(cmd);
        debug!(program = %self.program, cmd, "execute");
        let output = Command::new(&self.program)
            .args(&args)
            .env("PANEDECK_OFFSET", format!("0x{:x}", self.offset))
            .env("PANEDECK_DISASM_MODE", self.disasm_mode.to_string())
            .output();
        match output {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                text
            }
            Err(e) => {
                warn!(program = %self.program, error = %e, "failed to run command");
                format!("error: {}", e)
            }
        }
    }

    fn offset(&self) -> u64 {
        self.offset
    }

    fn seek(&mut self, addr: u64) {
        self.offset = addr;
    }

    fn disasm_mode(&mut self, mode: usize) {
        self.disasm_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_appended() {
        let exec = ShellExecutor::new(&ExecutorConfig::default());
        assert_eq!(exec.build_args("echo hi"), vec!["-c", "echo hi"]);
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let config = ExecutorConfig {
            program: "r2".into(),
            args: vec!["-qc".into(), "s {offset}; {cmd}".into(), "/bin/ls".into()],
        };
        let mut exec = ShellExecutor::new(&config);
        exec.seek(0x1000);
        assert_eq!(
            exec.build_args("pd 10"),
            vec!["-qc", "s 0x1000; pd 10", "/bin/ls"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_roundtrip() {
        let mut exec = ShellExecutor::new(&ExecutorConfig::default());
        exec.seek(0x40);
        assert_eq!(exec.execute("echo $PANEDECK_OFFSET"), "0x40\n");
    }
}
