use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{AuditArgs, ConvertArgs};
use crate::pipeline;
use crate::summary::{print_audit_summary, print_convert_summary};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let result = pipeline::convert(&args.osm_file, &output_dir, args.validate)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_convert_summary(&result);
    }
    Ok(())
}

pub fn run_audit(args: &AuditArgs) -> Result<()> {
    let result = pipeline::audit(&args.osm_file)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_audit_summary(&result);
    }
    Ok(())
}
