use typed_builder::TypedBuilder;

/// Construction-time options for [`Cpu`](super::Cpu).
///
/// ```
/// use dmgcore_gb::cpu::CpuConfig;
///
/// let config = CpuConfig::builder().strict(true).build();
/// assert!(config.strict);
/// assert_eq!(config.entry_point, 0x0100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    /// Record undocumented opcodes as [`Diagnostic`](super::Diagnostic)s.
    /// Execution stays permissive either way.
    #[builder(default)]
    pub strict: bool,
    /// Emit a `log::trace!` line before every instruction.
    #[builder(default)]
    pub trace: bool,
    #[builder(default)]
    pub ime_on_power_on: bool,
    /// PC at power-on. The boot ROM hands over at 0x0100.
    #[builder(default = 0x0100)]
    pub entry_point: u16,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
