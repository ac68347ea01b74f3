use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub fn handle(memberid: i32, email: String, output_format: OutputFormat) -> anyhow::Result<()> {
    let claims = Claims::new(memberid, email);
    let token = generate_jwt(&claims)?;

    match output_format {
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
        OutputFormat::Json => output_success(
            &output_format,
            "Token generated",
            Some(json!({ "token": token, "memberid": claims.memberid, "exp": claims.exp })),
        ),
    }
}
