/// Name reported in log messages for callbacks that were never named
pub const DEFAULT_CALLBACK_NAME: &str = "anonymous";
/// Separator between a configured name prefix and a callback name
pub const NAME_SEPARATOR: &str = "::";
