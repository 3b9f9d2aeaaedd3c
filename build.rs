// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn db_path_arg() -> Arg {
    Arg::new("db_path")
        .short('d')
        .long("db-path")
        .value_name("PATH")
        .default_value("tracker.db")
        .global(true)
        .help("Database path")
}

fn number_arg() -> Arg {
    Arg::new("number")
        .required(true)
        .value_parser(clap::value_parser!(i64))
        .help("Parcel number")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(clap::ArgAction::SetTrue)
        .help("Print as JSON")
}

fn build_cli() -> Command {
    Command::new("parcel-tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Parcel Tracker Contributors")
        .about("Track parcels in a SQLite database")
        .subcommand_required(false)
        .arg(db_path_arg())
        .subcommand(Command::new("init").about("Initialize the parcel database"))
        .subcommand(
            Command::new("add")
                .about("Register a new parcel")
                .arg(
                    Arg::new("client")
                        .short('c')
                        .long("client")
                        .required(true)
                        .value_parser(clap::value_parser!(i64))
                        .help("Client id"),
                )
                .arg(
                    Arg::new("address")
                        .short('a')
                        .long("address")
                        .required(true)
                        .help("Delivery address"),
                )
                .arg(
                    Arg::new("status")
                        .short('s')
                        .long("status")
                        .default_value("registered")
                        .help("Initial status"),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Show a parcel")
                .arg(number_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List the parcels of a client")
                .arg(
                    Arg::new("client")
                        .short('c')
                        .long("client")
                        .required(true)
                        .value_parser(clap::value_parser!(i64))
                        .help("Client id"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("set-status")
                .about("Change the status of a parcel")
                .arg(number_arg())
                .arg(Arg::new("status").required(true).help("New status")),
        )
        .subcommand(
            Command::new("set-address")
                .about("Change the address of a registered parcel")
                .arg(number_arg())
                .arg(Arg::new("address").required(true).help("New address")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a registered parcel")
                .arg(number_arg()),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to render man page");

    let man_path = man_dir.join("parcel-tracker.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
