// Dispatches a single request given on the command line, e.g.
//
//   cargo run --example cli -- /hi/jim GET
//   cargo run --example cli -- /test POST name=jim lang=rust

use routekit::{Error, Params, RequestContext, Router};

// A handler for "/hi/:name".
fn hi_handler(_: &RequestContext, params: &Params) -> Result<String, Error> {
    Ok(format!("Hello, {}\n", params.param("name").map(String::as_str).unwrap_or_default()))
}

// On the command line the `key=value` arguments are keyed by the lower-case verb.
fn test_handler(_: &RequestContext, params: &Params) -> Result<String, Error> {
    let mut pairs: Vec<String> = params
        .post()
        .map(|post| post.iter().map(|(k, v)| format!("    [{}] => {}", k, v)).collect())
        .unwrap_or_default();
    pairs.sort();

    Ok(format!("Array\n(\n{}\n)\n", pairs.join("\n")))
}

fn router() -> routekit::Result<Router<String, Error>> {
    Router::builder()
        .get("/hello", |_, _| Ok("Hello\n".to_owned()))
        .get("/hi/:name", hi_handler)
        .post("/test", test_handler)
        .build()
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "cli".to_owned());

    let result = router().and_then(|router| routekit::run_cli_args(&router, &program, args));

    match result {
        Ok(Some(output)) => print!("{}", output),
        Ok(None) => {}
        Err(err) => println!("{}", err),
    }
}
