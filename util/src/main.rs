//!
//! Command-line IPP utility to decode captured messages or encode new ones
//!

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use log::debug;

use ipp_codec::prelude::*;

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(path)
    }
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(data)
    } else {
        fs::write(path, data)
    }
}

fn parse_u16(s: &str) -> Result<u16, String> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| e.to_string())
}

fn parse_group(name: &str) -> Result<DelimiterTag, IppError> {
    let tag = match name {
        "operation" => DelimiterTag::OperationAttributes,
        "job" => DelimiterTag::JobAttributes,
        "printer" => DelimiterTag::PrinterAttributes,
        "unsupported" => DelimiterTag::UnsupportedAttributes,
        "subscription" => DelimiterTag::SubscriptionAttributes,
        "event-notification" => DelimiterTag::EventNotificationAttributes,
        "resource" => DelimiterTag::ResourceAttributes,
        "document" => DelimiterTag::DocumentAttributes,
        other => return Err(IppError::InvalidAttribute(format!("unknown group '{other}'"))),
    };
    Ok(tag)
}

fn parse_value(name: &str, value: &str) -> Result<IppValue, IppError> {
    let value = match name {
        IppAttribute::ATTRIBUTES_CHARSET => IppValue::Charset(value.to_owned()),
        IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE => IppValue::NaturalLanguage(value.to_owned()),
        IppAttribute::PRINTER_URI | IppAttribute::JOB_URI => IppValue::Uri(value.to_owned()),
        IppAttribute::DOCUMENT_FORMAT => IppValue::MimeMediaType(value.to_owned()),
        IppAttribute::REQUESTING_USER_NAME
        | IppAttribute::JOB_NAME
        | IppAttribute::DOCUMENT_NAME
        | IppAttribute::PRINTER_NAME => IppValue::NameWithoutLanguage(value.to_owned().into()),
        IppAttribute::STATUS_MESSAGE => IppValue::TextWithoutLanguage(value.to_owned().into()),
        IppAttribute::REQUESTED_ATTRIBUTES
        | IppAttribute::SIDES
        | IppAttribute::JOB_STATE_REASONS
        | IppAttribute::PRINTER_STATE_REASONS => IppValue::Keyword(value.to_owned()),
        IppAttribute::JOB_ID | IppAttribute::COPIES => {
            IppValue::Integer(value.parse().map_err(|_| IppError::InvalidAttributeType)?)
        }
        IppAttribute::JOB_STATE | IppAttribute::PRINTER_STATE => {
            IppValue::Enum(value.parse().map_err(|_| IppError::InvalidAttributeType)?)
        }
        IppAttribute::LAST_DOCUMENT => IppValue::Boolean(value.parse().map_err(|_| IppError::InvalidAttributeType)?),
        _ => match value.parse() {
            Ok(value) => value,
            Err(never) => match never {},
        },
    };
    Ok(value)
}

/// Parse `group:name=value[,value...]` into a group tag and a complete attribute
fn parse_attribute(arg: &str) -> Result<(DelimiterTag, IppAttribute), IppError> {
    let (group, rest) = arg
        .split_once(':')
        .ok_or_else(|| IppError::InvalidAttribute(arg.to_owned()))?;
    let (name, values) = rest
        .split_once('=')
        .ok_or_else(|| IppError::InvalidAttribute(arg.to_owned()))?;
    if name.is_empty() {
        return Err(IppError::InvalidAttribute(arg.to_owned()));
    }

    let values = values
        .split(',')
        .map(|v| parse_value(name, v))
        .collect::<Result<Vec<_>, _>>()?;

    let attribute =
        IppAttribute::with_values(name, values).ok_or_else(|| IppError::InvalidAttribute(arg.to_owned()))?;

    Ok((parse_group(group)?, attribute))
}

fn group_name(tag: DelimiterTag) -> &'static str {
    match tag {
        DelimiterTag::OperationAttributes => "operation-attributes",
        DelimiterTag::JobAttributes => "job-attributes",
        DelimiterTag::PrinterAttributes => "printer-attributes",
        DelimiterTag::UnsupportedAttributes => "unsupported-attributes",
        DelimiterTag::SubscriptionAttributes => "subscription-attributes",
        DelimiterTag::EventNotificationAttributes => "event-notification-attributes",
        DelimiterTag::ResourceAttributes => "resource-attributes",
        DelimiterTag::DocumentAttributes => "document-attributes",
        DelimiterTag::Reserved | DelimiterTag::EndOfAttributes => "reserved",
    }
}

fn print_attribute(attribute: &IppAttribute) {
    let values = attribute
        .values()
        .iter()
        .map(|v| format!("{v} ({:?})", v.to_tag()))
        .collect::<Vec<_>>();
    println!("    {}: {}", attribute.name(), values.join(", "));
}

fn do_decode(cmd: IppDecodeCmd) -> Result<(), IppError> {
    let data = read_input(&cmd.file)?;
    debug!("Decoding {} bytes from {}", data.len(), cmd.file.display());

    let message = ipp_codec::decode(data)?;
    let header = message.header();

    if let Some(ref name) = cmd.attribute {
        let attribute = message
            .attributes()
            .groups()
            .iter()
            .find_map(|group| group.get(name))
            .ok_or_else(|| IppError::MissingAttribute(name.clone()))?;
        print_attribute(attribute);
        return Ok(());
    }

    println!("version: {}", header.version);
    if cmd.response {
        println!(
            "status: {} (0x{:04x})",
            header.status_code(),
            header.operation_or_status
        );
    } else {
        match header.operation() {
            Some(op) => println!("operation: {:?} (0x{:04x})", op, header.operation_or_status),
            None => println!("operation: unknown (0x{:04x})", header.operation_or_status),
        }
    }
    println!("request-id: {}", header.request_id);

    for group in message.attributes().groups() {
        println!("{}:", group_name(group.tag()));
        for attribute in group.attributes() {
            print_attribute(attribute);
        }
    }

    println!("payload: {} bytes", message.payload().len());
    if let Some(ref path) = cmd.payload {
        write_output(path, message.payload())?;
    }

    Ok(())
}

fn do_encode(cmd: IppEncodeCmd) -> Result<(), IppError> {
    let header = IppHeader::new(cmd.version.parse()?, cmd.operation, cmd.request_id);
    let mut message = IppMessage::new(header);

    for arg in &cmd.attributes {
        let (group, attribute) = parse_attribute(arg)?;
        message.append_attribute(group, attribute);
    }

    if let Some(ref path) = cmd.payload {
        message.set_payload(read_input(path)?);
    }

    let data = ipp_codec::encode(&message)?;
    debug!("Encoded {} bytes", data.len());

    write_output(&cmd.output, &data)?;
    Ok(())
}

#[derive(Parser)]
#[clap(about = "IPP message codec utility", name = "ipputil", rename_all = "kebab-case")]
struct IppParams {
    #[clap(subcommand)]
    command: IppCommand,
}

#[derive(Parser)]
enum IppCommand {
    #[clap(name = "decode", about = "Decode a binary IPP message and print its contents")]
    Decode(IppDecodeCmd),
    #[clap(name = "encode", about = "Encode an IPP message from command-line arguments")]
    Encode(IppEncodeCmd),
}

#[derive(Parser, Clone)]
#[clap(rename_all = "kebab-case")]
struct IppDecodeCmd {
    #[clap(help = "Input file name, '-' for standard input")]
    file: PathBuf,

    #[clap(
        long = "response",
        short = 'r',
        help = "Interpret the header as a response status code"
    )]
    response: bool,

    #[clap(long = "attribute", short = 'a', help = "Print only the given attribute")]
    attribute: Option<String>,

    #[clap(long = "payload", short = 'p', help = "Write trailing document data to a file")]
    payload: Option<PathBuf>,
}

#[derive(Parser, Clone)]
#[clap(rename_all = "kebab-case")]
struct IppEncodeCmd {
    #[clap(
        long = "operation",
        short = 'o',
        value_parser = parse_u16,
        help = "Operation id or status code, decimal or 0x-prefixed hex"
    )]
    operation: u16,

    #[clap(long = "request-id", short = 'i', help = "Request id")]
    request_id: i32,

    #[clap(long = "version", short = 'v', default_value = "1.1", help = "IPP version")]
    version: String,

    #[clap(
        long = "attribute",
        short = 'a',
        help = "Attribute in group:name=value[,value...] format"
    )]
    attributes: Vec<String>,

    #[clap(long = "payload", short = 'p', help = "Document data to append, '-' for standard input")]
    payload: Option<PathBuf>,

    #[clap(help = "Output file name, '-' for standard output")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let params = IppParams::parse();

    match params.command {
        IppCommand::Decode(cmd) => do_decode(cmd)?,
        IppCommand::Encode(cmd) => do_encode(cmd)?,
    }
    Ok(())
}
