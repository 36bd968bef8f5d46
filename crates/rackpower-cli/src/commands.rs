//! Command implementations dispatching into the orchestrator.

use rackpower_core::report::Capture;
use rackpower_core::{
    CoreError, DefaultPowerControl, HostRegistry, PduError, PowerTarget,
};

use crate::error::CliError;
use crate::output::{get_formatter, ConsoleReport};

/// Run the status query for one host.
pub async fn run_status(registry: HostRegistry, host: &str, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let mut control = DefaultPowerControl::with_defaults(registry);

    if json {
        // Keep stdout machine-readable: progress lines are swallowed and the
        // summary (or the error) is emitted as a single JSON document.
        let mut progress = Capture::default();
        match control.status(host, &mut progress).await {
            Ok(status) => println!("{}", formatter.format_status(&status)),
            Err(e) => println!("{}", formatter.format_error(&e.to_string())),
        }
        Ok(())
    } else {
        let mut report = ConsoleReport;
        control.status(host, &mut report).await?;
        Ok(())
    }
}

/// Run a power transition for one host.
pub async fn run_power(
    registry: HostRegistry,
    host: &str,
    target: PowerTarget,
) -> Result<(), CliError> {
    let mut control = DefaultPowerControl::with_defaults(registry);
    let mut report = ConsoleReport;

    let result = match target {
        PowerTarget::On => control.power_on(host, &mut report).await,
        PowerTarget::Off => control.power_off(host, &mut report).await,
    };

    match result {
        Ok(()) => Ok(()),
        // The orchestrator already printed the confirmation failure line.
        Err(CoreError::Pdu(PduError::ConfirmationFailed { .. })) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
