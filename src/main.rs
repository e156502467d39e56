use routekit::{Config, Error, Middleware, Params, RequestContext, Router};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_FILE: &str = "routekit.toml";

// A handler for "/hi/:name".
fn hi_handler(_: &RequestContext, params: &Params) -> Result<String, Error> {
    Ok(format!(
        "Hello, {}\n",
        params.param("name").map(String::as_str).unwrap_or_default()
    ))
}

// A handler for "POST /test" which echoes the posted data.
fn test_handler(ctx: &RequestContext, params: &Params) -> Result<String, Error> {
    ctx.set_header("Content-Type: text/plain; charset=utf-8");

    let mut pairs: Vec<String> = params
        .post()
        .map(|post| post.iter().map(|(k, v)| format!("{} => {}", k, v)).collect())
        .unwrap_or_default();
    pairs.sort();

    Ok(format!("{}\n", pairs.join("\n")))
}

fn router() -> routekit::Result<Router<String, Error>> {
    Router::builder()
        .middleware(Middleware::before(|ctx: &RequestContext| {
            tracing::info!(remote_addr = %ctx.remote_addr(), verb = %ctx.verb(), path = ctx.path(), "request");
            Ok(())
        }))
        .get("/hello", |_, _| Ok("Hello\n".to_owned()))
        .get("/hi/:name", hi_handler)
        .post("/test", test_handler)
        .build()
}

fn load_config() -> Result<Config, Error> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        Config::load(path)
    } else {
        Config::from_env()
    }
}

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match router() {
        Ok(router) => routekit::run(router, &config).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
