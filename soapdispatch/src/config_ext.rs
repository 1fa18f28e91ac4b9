//! Encoding, decoding and sniffing settings stored in `soapconfig::Config`.

use anyhow::{Result, anyhow};
use serde_yaml::Value;
use soapconfig::Config;
use soapenv::{Decoder, Encoder, FaultNamespace};
use tracing::warn;

use crate::sniff::{SniffRule, default_rules};
use crate::{ActionRegistry, Dispatcher};

const DEFAULT_INDENT: &str = "  ";
const DEFAULT_XML_DECLARATION: bool = false;

/// Extension trait adding the dispatch settings to [`Config`].
///
/// ```rust,ignore
/// use soapconfig::get_config;
/// use soapdispatch::DispatchConfigExt;
///
/// let config = get_config();
/// let policy = config.get_fault_namespace()?;
/// ```
pub trait DispatchConfigExt {
    /// Indentation of encoded responses (`encoding.indent`, default two spaces)
    fn get_encoding_indent(&self) -> Result<String>;
    fn set_encoding_indent(&self, indent: String) -> Result<()>;

    /// Whether responses start with an XML declaration (`encoding.xml_declaration`)
    fn get_xml_declaration(&self) -> Result<bool>;
    fn set_xml_declaration(&self, enabled: bool) -> Result<()>;

    /// Fault detection policy for requests (`decoding.fault_namespace`)
    fn get_fault_namespace(&self) -> Result<FaultNamespace>;
    fn set_fault_namespace(&self, policy: FaultNamespace) -> Result<()>;

    /// Body sniffing rules (`dispatch.sniff`)
    fn get_sniff_rules(&self) -> Result<Vec<SniffRule>>;
    fn set_sniff_rules(&self, rules: &[SniffRule]) -> Result<()>;
}

impl DispatchConfigExt for Config {
    fn get_encoding_indent(&self) -> Result<String> {
        match self.get_value(&["encoding", "indent"]) {
            Ok(Value::String(s)) => Ok(s),
            _ => Ok(DEFAULT_INDENT.to_string()),
        }
    }

    fn set_encoding_indent(&self, indent: String) -> Result<()> {
        self.set_value(&["encoding", "indent"], Value::String(indent))
    }

    fn get_xml_declaration(&self) -> Result<bool> {
        match self.get_value(&["encoding", "xml_declaration"]) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => Ok(DEFAULT_XML_DECLARATION),
        }
    }

    fn set_xml_declaration(&self, enabled: bool) -> Result<()> {
        self.set_value(&["encoding", "xml_declaration"], Value::Bool(enabled))
    }

    fn get_fault_namespace(&self) -> Result<FaultNamespace> {
        match self.get_value(&["decoding", "fault_namespace"]) {
            Ok(Value::String(s)) => s
                .parse()
                .map_err(|e: String| anyhow!("decoding.fault_namespace: {}", e)),
            Ok(Value::Null) | Err(_) => Ok(FaultNamespace::default()),
            Ok(other) => Err(anyhow!(
                "decoding.fault_namespace must be a string, got {:?}",
                other
            )),
        }
    }

    fn set_fault_namespace(&self, policy: FaultNamespace) -> Result<()> {
        self.set_value(
            &["decoding", "fault_namespace"],
            Value::String(policy.as_str().to_string()),
        )
    }

    fn get_sniff_rules(&self) -> Result<Vec<SniffRule>> {
        match self.get_value(&["dispatch", "sniff"]) {
            Ok(Value::Null) | Err(_) => Ok(default_rules()),
            Ok(_) => self.get_section(&["dispatch", "sniff"]),
        }
    }

    fn set_sniff_rules(&self, rules: &[SniffRule]) -> Result<()> {
        let value = serde_yaml::to_value(rules)?;
        self.set_value(&["dispatch", "sniff"], value)
    }
}

impl Dispatcher {
    /// Builds a dispatcher with the encoder, decoder and sniffing rules
    /// described by `config`.
    pub fn from_config(config: &Config, registry: ActionRegistry) -> Result<Self> {
        let encoder = Encoder::new()
            .indent(config.get_encoding_indent()?)
            .declaration(config.get_xml_declaration()?);
        let decoder = Decoder::new().fault_namespace(config.get_fault_namespace()?);
        let rules = config.get_sniff_rules()?;
        if rules.is_empty() {
            warn!("No sniffing rules configured, {} will match nothing", crate::SOAP_BODY_PATH);
        }

        Ok(Dispatcher::new(registry)
            .with_encoder(encoder)
            .with_decoder(decoder)
            .with_rules(rules))
    }
}
