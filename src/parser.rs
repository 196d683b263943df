use crate::error::ParseError;
use crate::model::{Action, Flag, Record};
use chrono::NaiveDateTime;
use log::trace;

/// Syslog timestamps carry no year. 2000 is a leap year, so `Feb 29` parses.
pub const DEFAULT_YEAR: i32 = 2000;

const TIMESTAMP_FORMAT: &str = "%Y %b %d %H:%M:%S";

/// Parses UFW kernel log lines of the shape
/// `<Mon> <D> <HH:MM:SS> <host> kernel: [<uptime>] [UFW <ACTION>] KEY=VALUE ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParser {
    year: i32,
}

impl Default for LineParser {
    fn default() -> LineParser {
        LineParser { year: DEFAULT_YEAR }
    }
}

impl LineParser {
    pub fn new() -> LineParser {
        LineParser::default()
    }

    /// Stamp every parsed date with `year` instead of the placeholder.
    pub fn with_year(year: i32) -> LineParser {
        LineParser { year }
    }

    pub fn parse_line(&self, raw_line: &str) -> Result<Record, ParseError> {
        let date = self.parse_timestamp(raw_line)?;
        let (tag, fields) = split_action_tag(raw_line)?;

        let mut record = Record::new(date, Action::from_tag(tag));
        for token in fields.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => assign_field(&mut record, key, value)?,
                None => assign_flag(&mut record, token),
            }
        }

        Ok(record)
    }

    fn parse_timestamp(&self, line: &str) -> Result<NaiveDateTime, ParseError> {
        // Syslog pads single-digit days with a space, so "Aug  6" and
        // "Aug 16" both split into three tokens here.
        let mut head = line.split_whitespace();
        let (month, day, time) = match (head.next(), head.next(), head.next()) {
            (Some(month), Some(day), Some(time)) => (month, day, time),
            _ => return Err(ParseError::MissingTimestamp),
        };

        let stamp = format!("{} {} {} {}", self.year, month, day, time);
        NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT)
            .map_err(|_| ParseError::InvalidTimestamp(format!("{} {} {}", month, day, time)))
    }
}

/// Parse one line with the default placeholder year.
pub fn parse_line(raw_line: &str) -> Result<Record, ParseError> {
    LineParser::default().parse_line(raw_line)
}

/// Returns the text inside the action bracket and everything after it.
/// Example: `... kernel: [105600.181847] [UFW ALLOW] IN= OUT=eno1 ...`
fn split_action_tag(line: &str) -> Result<(&str, &str), ParseError> {
    let uptime_open = line.find('[').ok_or(ParseError::MissingAction)?;
    let uptime_close = line[uptime_open..]
        .find(']')
        .map(|i| uptime_open + i)
        .ok_or(ParseError::MissingAction)?;

    let after_uptime = line[uptime_close + 1..].trim_start();
    if !after_uptime.starts_with('[') {
        return Err(ParseError::MissingAction);
    }
    let tag_close = after_uptime.find(']').ok_or(ParseError::MissingAction)?;
    let tag = &after_uptime[1..tag_close];
    if tag.trim().is_empty() {
        return Err(ParseError::MissingAction);
    }

    Ok((tag, &after_uptime[tag_close + 1..]))
}

fn parse_port(key: &str, value: &str) -> Result<Option<u16>, ParseError> {
    value
        .parse::<u16>()
        .map(Some)
        .map_err(|_| ParseError::InvalidPort {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn assign_field(record: &mut Record, key: &str, value: &str) -> Result<(), ParseError> {
    let v = value.to_string();
    match key.to_ascii_uppercase().as_str() {
        "IN" => record.in_interface = v,
        "OUT" => record.out_interface = v,
        "MAC" => record.mac = v,
        "SRC" => record.src = v,
        "DST" => record.dst = v,
        "LEN" => record.len = v,
        "TOS" => record.tos = v,
        "PREC" => record.prec = v,
        "TTL" => record.ttl = v,
        "ID" => record.id = v,
        "PROTO" => record.proto = v,
        // Ports are the only integers, so records sort numerically by port.
        "SPT" => record.spt = parse_port(key, value)?,
        "DPT" => record.dpt = parse_port(key, value)?,
        "WINDOW" => record.window = v,
        "RES" => record.res = v,
        "URGP" => record.urgp = v,
        _ => trace!("ignored: {}", key),
    }
    Ok(())
}

fn assign_flag(record: &mut Record, token: &str) {
    match token.to_ascii_uppercase().as_str() {
        "DF" => record.df = Flag::Present,
        "SYN" => record.syn = Flag::Present,
        "ACK" => record.ack = Flag::Present,
        "PSH" => record.psh = Flag::Present,
        "RST" => record.rst = Flag::Present,
        "FIN" => record.fin = Flag::Present,
        "URG" => record.urg = Flag::Present,
        _ => trace!("ignored: {}", token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const LOG_LINE: &str = "Aug  6 06:25:20 myhost kernel: [105600.181847] [UFW ALLOW] IN= OUT=eno1 SRC=123.45.67.89 DST=123.45.67.88 LEN=60 TOS=0x00 PREC=0x00 TTL=64 ID=24678 DF PROTO=TCP SPT=37314 DPT=11211 WINDOW=29200 RES=0x00 SYN URGP=0";

    const LOG_LINE_MULTICAST: &str = "Aug  6 06:27:10 myhost kernel: [105709.694155] [UFW BLOCK] IN=eno1 OUT= MAC=01:00:5e:00:00:01:e8:de:27:25:a8:3e:08:00 SRC=192.168.0.1 DST=224.0.0.1 LEN=32 TOS=0x1C PREC=0xC0 TTL=1 ID=0 PROTO=2";

    fn parsed_line() -> Record {
        parse_line(LOG_LINE).unwrap()
    }

    #[test]
    fn parse_line_date() {
        let expected = NaiveDate::from_ymd_opt(DEFAULT_YEAR, 8, 6)
            .and_then(|d| d.and_hms_opt(6, 25, 20))
            .unwrap();
        assert_eq!(parsed_line().date(), expected);
    }

    #[test]
    fn parse_line_action() {
        let r = parsed_line();
        assert_eq!(r.action(), &Action::Allow);
        assert!(r.allowed());
        assert!(!r.blocked());
        assert_eq!(r.get_action_text(), "ALLOW");
    }

    #[test]
    fn parse_line_fields() {
        let r = parsed_line();
        assert_eq!(r.in_interface(), "");
        assert_eq!(r.out_interface(), "eno1");
        assert_eq!(r.mac(), "");
        assert_eq!(r.src(), "123.45.67.89");
        assert_eq!(r.dst(), "123.45.67.88");
        assert_eq!(r.len(), "60");
        assert_eq!(r.tos(), "0x00");
        assert_eq!(r.prec(), "0x00");
        assert_eq!(r.ttl(), "64");
        assert_eq!(r.id(), "24678");
        assert_eq!(r.proto(), "TCP");
        assert_eq!(r.window(), "29200");
        assert_eq!(r.res(), "0x00");
        assert_eq!(r.urgp(), "0");
        assert!(!r.inbound());
        assert!(r.outbound());
    }

    #[test]
    fn parse_line_ports_are_integers() {
        let r = parsed_line();
        assert_eq!(r.spt(), Some(37314));
        assert_eq!(r.dpt(), Some(11211));
    }

    #[test]
    fn parse_line_flags() {
        let r = parsed_line();
        assert_eq!(r.df(), Flag::Present);
        assert_eq!(r.syn(), Flag::Present);
        assert_eq!(r.ack(), Flag::Absent);
        assert_eq!(r.fin(), Flag::Absent);
    }

    #[test]
    fn multicast_line_has_mac_and_no_ports() {
        let r = parse_line(LOG_LINE_MULTICAST).unwrap();
        assert!(r.blocked());
        assert_eq!(r.in_interface(), "eno1");
        assert_eq!(r.out_interface(), "");
        assert_eq!(r.mac(), "01:00:5e:00:00:01:e8:de:27:25:a8:3e:08:00");
        assert_eq!(r.proto(), "2");
        assert_eq!(r.spt(), None);
        assert_eq!(r.dpt(), None);
        assert_eq!(r.df(), Flag::Absent);
        assert_eq!(r.window(), "");
        assert!(r.inbound());
        assert!(!r.outbound());
    }

    #[test]
    fn port_zero_is_not_absent() {
        let line = LOG_LINE.replace("SPT=37314", "SPT=0");
        assert_eq!(parse_line(&line).unwrap().spt(), Some(0));
    }

    #[test]
    fn two_digit_day_and_custom_year() {
        let line = LOG_LINE.replace("Aug  6", "Aug 16");
        let r = LineParser::with_year(2019).parse_line(&line).unwrap();
        let expected = NaiveDate::from_ymd_opt(2019, 8, 16)
            .and_then(|d| d.and_hms_opt(6, 25, 20))
            .unwrap();
        assert_eq!(r.date(), expected);
    }

    #[test]
    fn padded_uptime_and_other_tag() {
        let line = "Jan  1 00:00:01 host kernel: [    5.120000] [UFW AUDIT] IN=lo OUT= SRC=127.0.0.1 DST=127.0.0.1 PROTO=UDP SPT=53 DPT=5353";
        let r = parse_line(line).unwrap();
        assert_eq!(r.action(), &Action::Other("AUDIT".to_string()));
        assert_eq!(r.get_action_text(), "AUDIT");
        assert_eq!(r.dpt(), Some(5353));
    }

    #[test]
    fn unknown_keys_and_flags_are_ignored() {
        let line = format!("{} PHYSIN=br0 MARK=0x1 CE", LOG_LINE);
        assert_eq!(parse_line(&line).unwrap(), parsed_line());
    }

    #[test]
    fn missing_timestamp() {
        assert_eq!(parse_line(""), Err(ParseError::MissingTimestamp));
        assert_eq!(parse_line("Aug 6"), Err(ParseError::MissingTimestamp));
    }

    #[test]
    fn invalid_timestamp() {
        let line = "myhost kernel: [105600.181847] [UFW ALLOW] IN= OUT=eno1";
        match parse_line(line) {
            Err(ParseError::InvalidTimestamp(_)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_action() {
        let no_tag = "Aug  6 06:25:20 myhost kernel: [105600.181847] IN= OUT=eno1 SRC=1.2.3.4";
        assert_eq!(parse_line(no_tag), Err(ParseError::MissingAction));

        let no_brackets = "Aug  6 06:25:20 myhost kernel: IN= OUT=eno1 SRC=1.2.3.4";
        assert_eq!(parse_line(no_brackets), Err(ParseError::MissingAction));

        let unclosed = "Aug  6 06:25:20 myhost kernel: [105600.181847] [UFW ALLOW IN=";
        assert_eq!(parse_line(unclosed), Err(ParseError::MissingAction));
    }

    #[test]
    fn invalid_port() {
        let line = LOG_LINE.replace("DPT=11211", "DPT=http");
        assert_eq!(
            parse_line(&line),
            Err(ParseError::InvalidPort {
                key: "DPT".to_string(),
                value: "http".to_string(),
            })
        );
    }
}
