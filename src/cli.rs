use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "coleta",
    version,
    about = "TUI for finding recycling collection points by state and city"
)]
pub struct Args {
    /// State to preselect, by UF code (e.g. "SP")
    #[arg(short, long)]
    pub state: Option<String>,

    /// City to preselect once the state's city list loads
    #[arg(short, long)]
    pub city: Option<String>,
}
