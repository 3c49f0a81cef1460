// cmdtrace/src/hooks.rs
//! The `before_command_run` hook.
//!
//! Runs once per host invocation: masks the typed arguments, checks consent,
//! and reports two events (one per command, one generic). Every failure is
//! logged and swallowed; the host command always proceeds.

use cmdtrace_core::{
    build_vocabulary, flatten_with_root, hash_identity, mask_heuristic, mask_with_vocabulary, CommandTree,
    TelemetryConfig,
};
use log::{debug, info, warn};
use owo_colors::OwoColorize;

use crate::consent::{check_for_telemetry_consent, ConsentPrompt, TerminalPrompt, OPTED_IN_MESSAGE};
use crate::errors::TelemetryError;
use crate::event::{
    main_command, per_command_event_name, EventProperties, TelemetryEvent, GENERIC_EVENT_NAME,
};
use crate::heap::{EventSender, HeapClient};
use crate::identity::{HostIdentity, SystemIdentity};
use crate::metadata::ProjectMetadata;

pub const OPTED_OUT_MESSAGE: &str = "Telemetry is installed, but you have opted out of \
sharing usage analytics so none will be collected.";

/// What the hook ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Not inside a project; nothing is reported.
    PackageMode,
    OptedOut,
    /// Consent given, but the event could not be built.
    Skipped,
    /// Both events were handed to the sender (delivery failures are logged).
    Sent,
}

pub struct TelemetryHooks<S, P, I> {
    config: TelemetryConfig,
    sender: S,
    prompt: P,
    identity: I,
}

/// Hooks wired to the real endpoint, terminal and host.
pub type SystemHooks = TelemetryHooks<HeapClient, TerminalPrompt, SystemIdentity>;

impl SystemHooks {
    pub fn system(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        let sender = HeapClient::new(&config)?;
        Ok(TelemetryHooks::new(config, sender, TerminalPrompt, SystemIdentity))
    }
}

impl<S, P, I> TelemetryHooks<S, P, I>
where
    S: EventSender,
    P: ConsentPrompt,
    I: HostIdentity,
{
    pub fn new(config: TelemetryConfig, sender: S, prompt: P, identity: I) -> Self {
        Self {
            config,
            sender,
            prompt,
            identity,
        }
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Masks `command_args` with the vocabulary of `tree`, or with the
    /// syntax-only heuristic when no tree is known yet.
    pub fn mask_arguments(&self, command_args: &[String], tree: Option<&CommandTree>) -> Vec<String> {
        match tree {
            Some(tree) => {
                let structure = flatten_with_root(tree, false, &self.config.program_name);
                mask_with_vocabulary(&build_vocabulary(&structure), command_args)
            }
            None => mask_heuristic(command_args),
        }
    }

    pub fn before_command_run(
        &self,
        metadata: Option<&ProjectMetadata>,
        command_args: &[String],
        tree: Option<&CommandTree>,
    ) -> HookOutcome {
        let masked_args = self.mask_arguments(command_args, tree);
        let program = self.config.program_name.as_str();
        let main_command = main_command(program, &masked_args);
        debug!("Masked command: {}", masked_args.join(" "));

        let Some(metadata) = metadata else {
            debug!("Running outside a project, no usage analytics collected.");
            return HookOutcome::PackageMode;
        };

        if !check_for_telemetry_consent(&metadata.project_path, &self.prompt) {
            eprintln!("{}", OPTED_OUT_MESSAGE.green());
            return HookOutcome::OptedOut;
        }

        info!("{}", OPTED_IN_MESSAGE);

        let identity = match self.identity.hostname() {
            Ok(hostname) => hash_identity(&hostname),
            Err(e) => {
                warn!(
                    "Failed to determine the computer name. No data was sent. Exception: {}",
                    e
                );
                return HookOutcome::Skipped;
            }
        };

        let username = match self.identity.username() {
            Ok(username) => Some(username),
            Err(e) => {
                warn!(
                    "Something went wrong with getting the username. Exception: {}",
                    e
                );
                None
            }
        };

        let properties = EventProperties::new(program, &masked_args, metadata, username.as_deref());

        self.send(TelemetryEvent::new(
            &self.config,
            per_command_event_name(&main_command),
            identity.as_str(),
            properties.clone(),
        ));
        self.send(TelemetryEvent::new(
            &self.config,
            GENERIC_EVENT_NAME,
            identity,
            properties.with_main_command(main_command),
        ));

        HookOutcome::Sent
    }

    fn send(&self, event: TelemetryEvent) {
        if let Err(e) = self.sender.send(&event) {
            warn!("Failed to send data. {}", e);
        }
    }
}
