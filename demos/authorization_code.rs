//! Walks through the authorization code flow against a real provider.
//!
//! ```sh
//! OAUTH2_CLIENT='{"authorizationUrl":"https://as.example.com/authorize","tokenUrl":"https://as.example.com/token","clientId":"...","clientSecret":"...","redirectUrl":"http://localhost/cb","scope":"openid"}' \
//! 	cargo run --example authorization_code
//! ```
//!
//! Open the printed URL, sign in, then paste the full callback URL the browser lands on.

// std
use std::io::{self, BufRead, Write};
// crates.io
use color_eyre::{
	Result,
	eyre::{WrapErr, eyre},
};
use time::Duration;
// self
use oauth2_flow::{
	auth::generate_state, config::ClientConfiguration, flows::Client,
	redirect::RedirectRequest, schema::ResponseType,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let raw = std::env::var("OAUTH2_CLIENT").wrap_err("OAUTH2_CLIENT must hold the client JSON")?;
	let configuration: ClientConfiguration =
		serde_json::from_str(&raw).wrap_err("OAUTH2_CLIENT is not a client configuration")?;
	let client = Client::new(configuration)?;
	let state = generate_state();
	let url = client.authorization_url(Some(&state), ResponseType::Code)?;

	println!("Open this URL in a browser:\n\n  {url}\n");
	print!("Callback URL: ");
	io::stdout().flush()?;

	let mut line = String::new();

	io::stdin().lock().read_line(&mut line)?;

	let redirect: RedirectRequest = line.trim().parse().wrap_err("Callback is not a URL")?;
	let returned = client
		.authorization_return(&redirect, Some(&state))?
		.ok_or_else(|| eyre!("The callback carries no authorization code"))?;
	let token = client.exchange_code(&returned.code, Some(&state), Some(Duration::seconds(30))).await?;

	println!("token type: {}", token.token_type());
	println!("expires at: {:?}", token.expires_at());
	println!("scope: {}", token.scope().join(" "));
	println!("refresh token issued: {}", token.refresh_token().is_some());

	Ok(())
}
