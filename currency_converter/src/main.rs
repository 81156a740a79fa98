use currency_converter::config::Config;
use currency_converter::handler::{self, InvocationEvent};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    shared::log::init();

    let config = Config::from_env()?;
    info!("Rate source: {:?}", config.rates);

    let converter = config.converter().await;
    let converter = &converter;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<InvocationEvent>| async move {
            handler::func(converter, event).await
        },
    ))
    .await?;
    Ok(())
}
