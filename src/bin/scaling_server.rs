use std::net::SocketAddr;

use axis_scaler::grpc::serve;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut addr = "127.0.0.1:8001".to_string();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--addr" => addr = args.next().ok_or("--addr needs a value")?,
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    let addr: SocketAddr = addr.parse()?;
    serve(addr).await?;
    Ok(())
}
