use clap::{Parser, Subcommand};
use serde_json::Value;
use superqi_proxy_sdk::{GatewayClient, GatewayReply, PayRequest};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the SuperQi proxy gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:1999")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange an auth code for an access token
    ApplyToken {
        #[arg(long)]
        auth_code: String,
    },
    /// Fetch user info for an access token
    UserInfo {
        #[arg(long)]
        access_token: String,
    },
    /// List the cards bound to an access token
    UserCards {
        #[arg(long)]
        access_token: String,
    },
    /// Initiate a payment (amount in whole IQD)
    Pay {
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        order_desc: String,
        #[arg(long)]
        notify_url: String,
    },
    /// Query payment status
    Status { payment_id: String },
    /// Check gateway health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    let reply = match cli.command {
        Commands::ApplyToken { auth_code } => client.apply_token(&auth_code).await?,
        Commands::UserInfo { access_token } => client.user_info(&access_token).await?,
        Commands::UserCards { access_token } => client.user_cards(&access_token).await?,
        Commands::Pay {
            amount,
            request_id,
            access_token,
            customer_id,
            order_desc,
            notify_url,
        } => {
            client
                .pay(&PayRequest {
                    amount,
                    request_id,
                    access_token,
                    customer_id,
                    order_desc,
                    notify_url,
                })
                .await?
        }
        Commands::Status { payment_id } => client.payment_status(&payment_id).await?,
        Commands::Health => client.health().await?,
    };

    print_reply(&reply)
}

fn print_reply(reply: &GatewayReply) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = match &reply.body {
        Value::String(text) => text.clone(),
        json => serde_json::to_string_pretty(json)?,
    };

    if !reply.is_success() {
        eprintln!("Error: gateway returned status {}", reply.status);
        eprintln!("Response: {}", rendered);
        std::process::exit(1);
    }

    println!("{}", rendered);
    Ok(())
}
