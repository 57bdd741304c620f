use clap::{App, Arg, SubCommand};
use ico_rsrc::{BuildSession, IconSpec, IdSequence, Payload, ResourceKind};
use std::fs;
use std::path::PathBuf;

//===========================================================================//

fn main() {
    env_logger::init();
    let matches = App::new("rsrctool")
        .version("0.1")
        .about("Builds icon resources from ICO files")
        .arg(
            Arg::with_name("first-id")
                .takes_value(true)
                .value_name("ID")
                .long("first-id")
                .help("Sets the first numeric resource ID (default 1)"),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists the resources built from ICO files")
                .arg(
                    Arg::with_name("icon")
                        .multiple(true)
                        .required(true)
                        .help("An icon spec, NAME=PATH or just PATH"),
                ),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Rebuilds an ICO file from its group resource")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("icon").required(true)),
        )
        .get_matches();
    let first_id = match matches.value_of("first-id") {
        Some(id) => id.parse::<u16>().unwrap(),
        None => 1,
    };
    let mut session = BuildSession::new(IdSequence::starting_at(first_id));
    if let Some(submatches) = matches.subcommand_matches("list") {
        if let Some(specs) = submatches.values_of("icon") {
            for spec in specs {
                println!("Adding {:?}", spec);
                if let Err(error) = session.add(&IconSpec::parse(spec)) {
                    eprintln!("{}: {}", spec, error);
                    std::process::exit(1);
                }
            }
        }
        let table = session.table();
        for resource in table.resources() {
            let detail = match resource.payload() {
                Payload::Section(section) => format!(
                    "{} bytes at offset {} of {}",
                    section.len(),
                    section.offset(),
                    section.source().name()
                ),
                Payload::Group(group) => {
                    let ids: Vec<String> =
                        group.ids().map(|id| id.to_string()).collect();
                    format!("{} images: {}", group.len(), ids.join(", "))
                }
            };
            let name = match resource.id() {
                ico_rsrc::ResourceId::Named(index) => table
                    .string(index)
                    .map(|string| string.to_string_lossy())
                    .unwrap_or_default(),
                id => id.to_string(),
            };
            println!("{:?} {:>8}: {}", resource.kind(), name, detail);
        }
    } else if let Some(submatches) = matches.subcommand_matches("extract") {
        let spec = IconSpec::parse(submatches.value_of("icon").unwrap());
        let group_id = match session.add(&spec).unwrap() {
            Some(group_id) => group_id,
            None => {
                eprintln!("{} has no images", spec.path().display());
                std::process::exit(1);
            }
        };
        let data = session.table().extract_icon(group_id).unwrap();
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            PathBuf::from("out.ico")
        };
        fs::write(out_path, data).unwrap();
        let images = session.table().resources_of(ResourceKind::Icon).count();
        println!("Extracted {} images", images);
    }
}

//===========================================================================//
