use crate::config::FilterConfig;
use crate::error::ConfigError;
use crate::model::Record;

/// One enabled filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    AllowOnly,
    BlockOnly,
    InboundOnly,
    OutboundOnly,
    SourcePort(u16),
    SourceIp(String),
    DestinationPort(u16),
    DestinationIp(String),
}

impl Criterion {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Criterion::AllowOnly => record.allowed(),
            Criterion::BlockOnly => record.blocked(),
            Criterion::InboundOnly => record.inbound(),
            Criterion::OutboundOnly => record.outbound(),
            // An absent port never equals a configured one.
            Criterion::SourcePort(port) => record.spt() == Some(*port),
            Criterion::SourceIp(ip) => record.src() == ip,
            Criterion::DestinationPort(port) => record.dpt() == Some(*port),
            Criterion::DestinationIp(ip) => record.dst() == ip,
        }
    }
}

fn required<T: Clone>(value: &Option<T>, name: &'static str) -> Result<T, ConfigError> {
    value.clone().ok_or(ConfigError::MissingValue(name))
}

/// Turn a config into its list of enabled criteria, failing on any
/// value-based toggle that has no value.
pub fn compile(config: &FilterConfig) -> Result<Vec<Criterion>, ConfigError> {
    let mut criteria = Vec::new();

    if config.filter_allow_only {
        criteria.push(Criterion::AllowOnly);
    }
    if config.filter_block_only {
        criteria.push(Criterion::BlockOnly);
    }
    if config.filter_inbound_only {
        criteria.push(Criterion::InboundOnly);
    }
    if config.filter_outbound_only {
        criteria.push(Criterion::OutboundOnly);
    }
    if config.filter_source_port {
        let port = required(&config.source_port, "filter_source_port")?;
        criteria.push(Criterion::SourcePort(port));
    }
    if config.filter_source_ip {
        let ip = required(&config.source_ip, "filter_source_ip")?;
        criteria.push(Criterion::SourceIp(ip));
    }
    if config.filter_destination_port {
        let port = required(&config.destination_port, "filter_destination_port")?;
        criteria.push(Criterion::DestinationPort(port));
    }
    if config.filter_destination_ip {
        let ip = required(&config.destination_ip, "filter_destination_ip")?;
        criteria.push(Criterion::DestinationIp(ip));
    }

    Ok(criteria)
}

/// A read-only view over `records` that yields only those matching every
/// enabled criterion, in their original order. Each call to `iter` starts
/// over from the first record.
#[derive(Debug, Clone)]
pub struct RecordFilter<'a> {
    records: &'a [Record],
    criteria: Vec<Criterion>,
}

impl<'a> RecordFilter<'a> {
    pub fn new(records: &'a [Record], config: &FilterConfig) -> Result<RecordFilter<'a>, ConfigError> {
        Ok(RecordFilter {
            records,
            criteria: compile(config)?,
        })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }

    pub fn iter<'f>(&'f self) -> impl Iterator<Item = &'a Record> + 'f {
        self.records.iter().filter(move |r| self.matches(r))
    }
}

impl<'a, 'f> IntoIterator for &'f RecordFilter<'a> {
    type Item = &'a Record;
    type IntoIter = Box<dyn Iterator<Item = &'a Record> + 'f>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Filter `records` without keeping a `RecordFilter` around.
pub fn filter_records<'a>(
    records: &'a [Record],
    config: &FilterConfig,
) -> Result<impl Iterator<Item = &'a Record>, ConfigError> {
    let criteria = compile(config)?;
    Ok(records
        .iter()
        .filter(move |r| criteria.iter().all(|c| c.matches(r))))
}
