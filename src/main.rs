use clap::{Parser, Subcommand};
use serde::Serialize;

use weixin::{config, Client};

#[derive(Parser)]
#[command(version = "0.1")]
struct Opts {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the OAuth consent URL
    AuthorizeUrl {
        redirect_uri: String,
        #[arg(long, default_value = weixin::SCOPE_BASE)]
        scope: String,
        #[arg(long, default_value = "")]
        state: String,
    },
    /// Fetch an application access token
    Token,
    /// Exchange an authorization code for a user token
    WebToken { code: String },
    RefreshToken { refresh_token: String },
    CheckToken { access_token: String, openid: String },
    UserInfo { access_token: String, openid: String },
    Ticket { access_token: String },
    /// Build the JS-SDK config for a page URL
    Sign {
        ticket: String,
        url: String,
        #[arg(long)]
        nonce: Option<String>,
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli_opts: Opts = Opts::parse();
    let conf = config::Config::from_file(cli_opts.config.as_str())?;

    log::debug!("{:?}", conf);

    let client = Client::try_from(conf)?;

    match cli_opts.command {
        Command::AuthorizeUrl {
            redirect_uri,
            scope,
            state,
        } => println!(
            "{}",
            client.build_authorization_url(&redirect_uri, &scope, &state)
        ),
        Command::Token => print(&client.fetch_access_token()?)?,
        Command::WebToken { code } => print(&client.fetch_web_access_token(&code)?)?,
        Command::RefreshToken { refresh_token } => {
            print(&client.refresh_web_access_token(&refresh_token)?)?
        }
        Command::CheckToken {
            access_token,
            openid,
        } => print(&client.check_web_access_token(&access_token, &openid)?)?,
        Command::UserInfo {
            access_token,
            openid,
        } => print(&client.fetch_user_info(&access_token, &openid)?)?,
        Command::Ticket { access_token } => print(&client.fetch_ticket(&access_token)?)?,
        Command::Sign {
            ticket,
            url,
            nonce,
            timestamp,
        } => match (nonce, timestamp) {
            (Some(nonce), Some(timestamp)) => {
                print(&client.jsapi_config_with(&ticket, &nonce, timestamp, &url))?
            }
            _ => print(&client.jsapi_config(&ticket, &url))?,
        },
    }

    Ok(())
}
