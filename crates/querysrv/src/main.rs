use std::sync::Arc;

use clap::Parser;
use llm::client::LlmClient;
use mysqlexec::exec::MysqlExecutor;
use querysrv::args::Arguments;
use querysrv::server::{serve, ServerState};
use sqlgen::schema::SchemaDescription;
use sqlgen::translate::Translator;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    logutil::configure_global_logger(args.log_level(), logutil::LogFormat::HumanReadable);

    if let Err(e) = run(args).await {
        println!("ERROR: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Arguments) -> anyhow::Result<()> {
    // Loaded once; a missing schema file aborts startup.
    let schema = SchemaDescription::from_file(&args.schema_file)?;
    info!(
        path = %args.schema_file.display(),
        bytes = schema.as_str().len(),
        "loaded schema description"
    );

    let client = LlmClient::new(args.llm_config())?;
    let translator = Translator::new(Arc::new(client), &schema);
    let executor = MysqlExecutor::new(&args.store_config())?;

    let state = Arc::new(ServerState {
        translator,
        executor: Arc::new(executor),
    });

    let listener = TcpListener::bind(&args.listen_addr).await?;
    info!(model = %args.model, "starting query service");
    serve(listener, state).await?;

    Ok(())
}
