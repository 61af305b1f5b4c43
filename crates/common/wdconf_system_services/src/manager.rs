use crate::*;
use std::fmt::Debug;

/// Abstraction over the system-provided facility that manages starting, restarting as well as other
/// service-related management functions of system services.
pub trait SystemServiceManager: Debug {
    /// Returns the name of the system service manager facility (e.g. "systemd" or "openrc").
    fn name(&self) -> &str;

    /// Checks whether the system service manager facility is available and operational.
    fn check_operational(&self) -> Result<(), SystemServiceError>;

    /// Starts the specified system service.
    fn start_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError>;

    /// Restarts the specified system service.
    fn restart_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError>;

    /// Enables the specified system service. This does not start the service, unless you reboot.
    fn enable_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError>;

    /// Queries status of the specified system service. "Running" here means the same as "active".
    fn is_service_running(&self, service: SystemService<'_>) -> Result<bool, SystemServiceError>;

    /// Makes the service manager re-read its own configuration files.
    fn reload_manager(&self) -> Result<(), SystemServiceError>;
}
