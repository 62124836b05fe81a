//! Request command implementation.

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, instrument};

use campus_core::{ApiRequest, Method};

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: Method,

    /// Path relative to the API base URL (e.g. /cursos)
    pub path: String,

    /// JSON request body
    #[arg(long, short)]
    pub data: Option<String>,

    /// Query parameter as key=value (repeatable)
    #[arg(long, short, value_parser = parse_key_value)]
    pub query: Vec<(String, String)>,

    /// Print JSON responses on one line
    #[arg(long)]
    pub compact: bool,
}

#[instrument(skip_all, fields(method = %args.method, path = %args.path))]
pub async fn run(args: RequestArgs, options: &ApiOptions) -> Result<()> {
    let gateway = session::open_gateway(options)?;

    let mut request = ApiRequest::new(args.method, args.path);
    for (key, value) in args.query {
        request = request.query(key, value);
    }
    if let Some(data) = &args.data {
        let body: serde_json::Value =
            serde_json::from_str(data).context("--data must be valid JSON")?;
        request = request.json(&body)?;
    }

    let response = match gateway.send(request).await {
        Ok(response) => response,
        Err(err) if err.is_session_error() => {
            return Err(anyhow::Error::new(err)
                .context("Request failed: the session has ended, run 'campus auth login'"));
        }
        Err(err) => return Err(anyhow::Error::new(err).context("Request failed")),
    };
    debug!(status = response.status, bytes = response.body.len(), "Response received");

    if response.body.is_empty() {
        output::success(&format!("HTTP {}", response.status));
        return Ok(());
    }

    match response.json::<serde_json::Value>() {
        Ok(value) => output::json(&value, args.compact),
        Err(_) => {
            println!("{}", response.text());
            Ok(())
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_pairs() {
        assert_eq!(
            parse_key_value("periodo=2024-1").unwrap(),
            ("periodo".to_string(), "2024-1".to_string())
        );
        assert_eq!(
            parse_key_value("filtro=a=b").unwrap(),
            ("filtro".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("sin-igual").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
