use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ticket-cli")]
#[command(about = "Counter-side CLI for the ticket queue service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a new ticket
    Take,
    /// Call the next waiting ticket
    Call,
    /// Show how many people are waiting
    Size,
}

impl Commands {
    fn path(&self) -> &'static str {
        match self {
            Commands::Take => "/get_ticket",
            Commands::Call => "/call_ticket",
            Commands::Size => "/list_tickets",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path()))
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }

    println!("{}", text);
    Ok(())
}
