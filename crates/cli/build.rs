use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("mailsift")
        .version("0.2.0")
        .author("Mailsift Contributors")
        .about("Extract email addresses from a web domain")
        .arg(clap::arg!(<INPUT> "Domain or URL to crawl, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--json "Emit a JSON report instead of one address per line"))
        .arg(clap::arg!(--depth <NUM> "How many link hops to follow from the start page").default_value("2"))
        .arg(clap::arg!(--"max-pages" <NUM> "Maximum number of pages to fetch").default_value("100"))
        .arg(clap::arg!(--concurrency <NUM> "How many pages to fetch in parallel").default_value("8"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--"follow-external" "Follow links leaving the start domain"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "mailsift", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "mailsift", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "mailsift", &completions_dir).unwrap();
    clap_complete::generate_to(
        clap_complete::shells::PowerShell,
        &mut cmd,
        "mailsift",
        &completions_dir,
    )
    .unwrap();
}
