use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "contact-cli")]
#[command(about = "Send test submissions to a running contact-gate", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Sent as X-Forwarded-For, to act as a particular source.
    #[arg(long)]
    forwarded_for: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a contact form
    Submit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        interest: Option<String>,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Submit {
            name,
            email,
            phone,
            company,
            subject,
            message,
            interest,
        } => {
            let body = json!({
                "name": name,
                "email": email,
                "phone": phone,
                "company": company,
                "subject": subject,
                "message": message,
                "interest": interest,
            });
            let mut request = client.post(format!("{}/api/contact", cli.url)).json(&body);
            if let Some(ip) = &cli.forwarded_for {
                request = request.header("x-forwarded-for", ip);
            }
            print_response(request.send().await?).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: contact-gate returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
