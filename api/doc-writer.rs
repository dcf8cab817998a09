use genai_gateway::gateway::UseCase;
use vercel_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    genai_gateway::vercel::serve(UseCase::DocWriter).await
}
