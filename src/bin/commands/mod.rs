pub mod utils;

use clap::Subcommand;
use form_relay::{
    flatten_parameter_map, parse_query_string, serialize_to_query_string, FormPostClient,
    LaunchForm, ParameterSet, PostConfig, BASICLTI_SUBMIT,
};
use std::time::Duration;
use utils::{parse_param, print_params};

#[derive(Subcommand)]
pub enum Commands {
    /// POST parameters as a form and print the response body
    ///
    /// Usage examples:
    /// # Send two parameters to a tool endpoint
    /// form-relay post https://tool.example.com/launch -p user_id=42 -p role=Learner
    ///
    /// # Give up after 5 seconds
    /// form-relay post https://tool.example.com/launch -p a=1 --timeout 5
    Post {
        /// Destination address
        address: String,

        /// Form parameter (format: key=value, repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Request timeout in seconds
        #[arg(
            long,
            env = "FORM_RELAY_TIMEOUT_SECS",
            default_value = "30",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout: u64,

        /// User-Agent header to send
        #[arg(long, env = "FORM_RELAY_USER_AGENT")]
        user_agent: Option<String>,
    },

    /// Print parameters as a percent-encoded query string
    ///
    /// Usage examples:
    /// form-relay query -p course="Rust 101" -p role=Learner
    Query {
        /// Parameter (format: key=value, repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Print an auto-submitting launch form for the parameters
    ///
    /// Usage examples:
    /// form-relay launch https://tool.example.com/lti -p user_id=42 -p basiclti_submit=Launch
    Launch {
        /// Address the form posts to
        address: String,

        /// Form parameter (format: key=value, repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Parameter rendered as the submit button
        #[arg(long, default_value = BASICLTI_SUBMIT)]
        submit_key: String,
    },

    /// Parse a query string and keep the first value of each parameter
    ///
    /// Usage examples:
    /// form-relay flatten "role=Learner&role=Instructor&id=7" --json
    Flatten {
        /// Raw query string or form body
        query: String,

        /// Print a JSON object instead of key=value lines
        #[arg(long)]
        json: bool,
    },
}

pub async fn execute_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Post {
            address,
            params,
            timeout,
            user_agent,
        } => {
            let mut config = PostConfig::default().with_timeout(Duration::from_secs(timeout));
            if let Some(user_agent) = user_agent {
                config = config.with_user_agent(user_agent);
            }

            let http_client = http_client::native::NativeClient::new();
            let client = FormPostClient::with_config(Box::new(http_client), config);
            let params = ParameterSet::from_pairs(params);

            let body = client.submit_form_post(&address, &params).await?;
            println!("{body}");
        }
        Commands::Query { params } => {
            println!(
                "{}",
                serialize_to_query_string(&ParameterSet::from_pairs(params))
            );
        }
        Commands::Launch {
            address,
            params,
            submit_key,
        } => {
            let html = LaunchForm::new(address)
                .submit_key(submit_key)
                .render(&ParameterSet::from_pairs(params));
            print!("{html}");
        }
        Commands::Flatten { query, json } => {
            let params = flatten_parameter_map(&parse_query_string(&query))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&params)?);
            } else {
                print_params(&params);
            }
        }
    }

    Ok(())
}
