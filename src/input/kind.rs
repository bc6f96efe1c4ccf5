use std::fmt;

/// The concrete type of a data input, keyed by its path below the inputs root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputKind {
    Monitor,
    Script,
    TcpRaw,
    TcpCooked,
    Udp,
    WindowsEventLog,
    WindowsPerfmon,
    WindowsWmi,
    WindowsRegistry,
    WindowsActiveDirectory,
    /// A kind this crate has no dedicated variant for.
    Other(String),
}

impl InputKind {
    pub fn from_relpath(relpath: &str) -> Self {
        match relpath {
            "monitor" => InputKind::Monitor,
            "script" => InputKind::Script,
            "tcp/raw" => InputKind::TcpRaw,
            "tcp/cooked" => InputKind::TcpCooked,
            "udp" => InputKind::Udp,
            "win-event-log-collections" => InputKind::WindowsEventLog,
            "win-perfmon" => InputKind::WindowsPerfmon,
            "win-wmi-collections" => InputKind::WindowsWmi,
            "registry" => InputKind::WindowsRegistry,
            "ad" => InputKind::WindowsActiveDirectory,
            other => InputKind::Other(other.to_string()),
        }
    }

    /// Path below the inputs root, e.g. `tcp/raw`.
    pub fn relpath(&self) -> &str {
        match self {
            InputKind::Monitor => "monitor",
            InputKind::Script => "script",
            InputKind::TcpRaw => "tcp/raw",
            InputKind::TcpCooked => "tcp/cooked",
            InputKind::Udp => "udp",
            InputKind::WindowsEventLog => "win-event-log-collections",
            InputKind::WindowsPerfmon => "win-perfmon",
            InputKind::WindowsWmi => "win-wmi-collections",
            InputKind::WindowsRegistry => "registry",
            InputKind::WindowsActiveDirectory => "ad",
            InputKind::Other(relpath) => relpath,
        }
    }

    /// Short label the server uses in `inputs.conf` stanzas.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            InputKind::Monitor => Some("monitor"),
            InputKind::Script => Some("script"),
            InputKind::TcpRaw => Some("tcp"),
            InputKind::TcpCooked => Some("splunktcp"),
            InputKind::Udp => Some("udp"),
            InputKind::WindowsEventLog => Some("win-event-log-collections"),
            InputKind::WindowsPerfmon => Some("win-perfmon"),
            InputKind::WindowsWmi => Some("win-wmi-collections"),
            InputKind::WindowsRegistry => Some("registry"),
            InputKind::WindowsActiveDirectory => Some("ad"),
            InputKind::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InputKind::Other(_))
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relpath())
    }
}
