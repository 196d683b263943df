use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    Allow,
    Block,
    /// Any other UFW tag (AUDIT, LIMIT BLOCK, ...), kept as written.
    Other(String),
}

impl Action {
    pub fn from_tag(tag: &str) -> Action {
        let tag = tag.trim();
        let suffix = tag.strip_prefix("UFW ").unwrap_or(tag).trim();
        match suffix {
            "ALLOW" => Action::Allow,
            "BLOCK" => Action::Block,
            other => Action::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::Allow => "ALLOW",
            Action::Block => "BLOCK",
            Action::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bare token such as `DF` or `SYN`, which is either on the line or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flag {
    Present,
    Absent,
}

impl Flag {
    pub fn is_set(self) -> bool {
        self == Flag::Present
    }
}

impl Default for Flag {
    fn default() -> Flag {
        Flag::Absent
    }
}

/// One parsed firewall log line.
///
/// Fields are only written by the parser. Text fields missing from the line
/// are empty, flags are `Absent`, and ports are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub(crate) date: NaiveDateTime,
    pub(crate) action: Action,
    pub(crate) in_interface: String,
    pub(crate) out_interface: String,
    pub(crate) mac: String,
    pub(crate) src: String,
    pub(crate) dst: String,
    pub(crate) len: String,
    pub(crate) tos: String,
    pub(crate) prec: String,
    pub(crate) ttl: String,
    pub(crate) id: String,
    pub(crate) df: Flag,
    pub(crate) proto: String,
    pub(crate) spt: Option<u16>,
    pub(crate) dpt: Option<u16>,
    pub(crate) window: String,
    pub(crate) res: String,
    pub(crate) syn: Flag,
    pub(crate) ack: Flag,
    pub(crate) psh: Flag,
    pub(crate) rst: Flag,
    pub(crate) fin: Flag,
    pub(crate) urg: Flag,
    pub(crate) urgp: String,
}

impl Record {
    pub(crate) fn new(date: NaiveDateTime, action: Action) -> Record {
        Record {
            date,
            action,
            in_interface: String::new(),
            out_interface: String::new(),
            mac: String::new(),
            src: String::new(),
            dst: String::new(),
            len: String::new(),
            tos: String::new(),
            prec: String::new(),
            ttl: String::new(),
            id: String::new(),
            df: Flag::Absent,
            proto: String::new(),
            spt: None,
            dpt: None,
            window: String::new(),
            res: String::new(),
            syn: Flag::Absent,
            ack: Flag::Absent,
            psh: Flag::Absent,
            rst: Flag::Absent,
            fin: Flag::Absent,
            urg: Flag::Absent,
            urgp: String::new(),
        }
    }

    pub fn allowed(&self) -> bool {
        self.action == Action::Allow
    }

    pub fn blocked(&self) -> bool {
        self.action == Action::Block
    }

    /// An inbound interface was recorded. Independent of `outbound`.
    pub fn inbound(&self) -> bool {
        !self.in_interface.is_empty()
    }

    pub fn outbound(&self) -> bool {
        !self.out_interface.is_empty()
    }

    pub fn get_action_text(&self) -> &str {
        self.action.as_str()
    }

    /// Month, day and time from the log. The year is a placeholder.
    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn in_interface(&self) -> &str {
        &self.in_interface
    }

    pub fn out_interface(&self) -> &str {
        &self.out_interface
    }

    pub fn mac(&self) -> &str {
        &self.mac
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn dst(&self) -> &str {
        &self.dst
    }

    pub fn len(&self) -> &str {
        &self.len
    }

    pub fn tos(&self) -> &str {
        &self.tos
    }

    pub fn prec(&self) -> &str {
        &self.prec
    }

    pub fn ttl(&self) -> &str {
        &self.ttl
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn df(&self) -> Flag {
        self.df
    }

    pub fn proto(&self) -> &str {
        &self.proto
    }

    pub fn spt(&self) -> Option<u16> {
        self.spt
    }

    pub fn dpt(&self) -> Option<u16> {
        self.dpt
    }

    pub fn window(&self) -> &str {
        &self.window
    }

    pub fn res(&self) -> &str {
        &self.res
    }

    pub fn syn(&self) -> Flag {
        self.syn
    }

    pub fn ack(&self) -> Flag {
        self.ack
    }

    pub fn psh(&self) -> Flag {
        self.psh
    }

    pub fn rst(&self) -> Flag {
        self.rst
    }

    pub fn fin(&self) -> Flag {
        self.fin
    }

    pub fn urg(&self) -> Flag {
        self.urg
    }

    pub fn urgp(&self) -> &str {
        &self.urgp
    }
}

fn port_text(port: Option<u16>) -> String {
    port.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}->{} {}:{} -> {}:{} {}",
            self.date.format("%b %e %H:%M:%S"),
            self.action,
            self.in_interface,
            self.out_interface,
            self.src,
            port_text(self.spt),
            self.dst,
            port_text(self.dpt),
            self.proto,
        )
    }
}
