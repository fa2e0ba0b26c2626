use super::target::TestTarget;
use crate::config::GradleConfig;
use std::process::Command;

/// Environment variable Kotest reads to select specs
pub const SPEC_FILTER_ENV: &str = "kotest_filter_specs";

/// Environment variable Kotest reads to select tests by path
pub const TEST_FILTER_ENV: &str = "kotest_filter_tests";

/// A Gradle invocation running one Kotest target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<String>,
    pub env: Vec<(String, String)>,
}

impl GradleCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// `<gradle> <task> --tests <spec>` with Kotest's filter variables set
    pub fn for_target(target: &TestTarget, config: &GradleConfig) -> Self {
        let mut args = vec![
            config.task().to_string(),
            "--tests".to_string(),
            target.spec_fq_name.clone(),
        ];
        args.extend(config.extra_args().iter().cloned());

        let mut command = Self::new(config.command(), args)
            .with_env(SPEC_FILTER_ENV, &target.spec_fq_name);
        if let Some(path) = &target.test_path {
            command = command.with_env(TEST_FILTER_ENV, path);
        }
        if let Some(env) = &config.env {
            let mut extra: Vec<_> = env.iter().collect();
            extra.sort();
            for (key, value) in extra {
                command = command.with_env(key, value);
            }
        }
        command
    }

    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The command as one shell line, environment assignments first
    pub fn to_shell_command(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{key}={}", quote(value)))
            .collect();
        parts.push(quote(&self.program));
        parts.extend(self.args.iter().map(|arg| quote(arg)));
        parts.join(" ")
    }

    /// A process ready to spawn; nothing is run here
    pub fn to_process_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }
        command
    }
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
