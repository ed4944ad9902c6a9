//! Scripted [`GitRunner`] for unit tests

use anyhow::{bail, Result};
use std::cell::RefCell;

use super::{GitOutput, GitRunner};

/// Records every invocation and answers from a list of prefix rules.
///
/// The first rule whose argument prefix matches wins; unmatched commands
/// succeed with empty output.
#[derive(Default)]
pub struct ScriptedGit {
    rules: Vec<(Vec<String>, Option<GitOutput>)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `output`
    pub fn on(mut self, prefix: &[&str], output: GitOutput) -> Self {
        self.rules
            .push((prefix.iter().map(|s| s.to_string()).collect(), Some(output)));
        self
    }

    /// Make commands starting with `prefix` fail to spawn
    pub fn unspawnable(mut self, prefix: &[&str]) -> Self {
        self.rules
            .push((prefix.iter().map(|s| s.to_string()).collect(), None));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Invocations rendered as single strings, e.g. `"remote add origin ..."`
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }

    pub fn was_called(&self, prefix: &[&str]) -> bool {
        self.calls().iter().any(|call| starts_with(call, prefix))
    }

    fn answer(&self, args: &[&str]) -> Result<GitOutput> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|s| s.to_string()).collect());

        for (prefix, output) in &self.rules {
            let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
            if args.len() >= prefix.len() && args[..prefix.len()] == prefix[..] {
                return match output {
                    Some(output) => Ok(output.clone()),
                    None => bail!("failed to spawn git {}", args.join(" ")),
                };
            }
        }

        Ok(GitOutput::ok(""))
    }
}

fn starts_with(call: &[String], prefix: &[&str]) -> bool {
    call.len() >= prefix.len() && call.iter().zip(prefix).all(|(a, b)| a == b)
}

impl GitRunner for ScriptedGit {
    fn output(&self, args: &[&str]) -> Result<GitOutput> {
        self.answer(args)
    }

    fn status(&self, args: &[&str]) -> Result<bool> {
        Ok(self.answer(args)?.success)
    }
}
