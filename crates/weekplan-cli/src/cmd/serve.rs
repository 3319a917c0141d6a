use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, open: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let port = port.unwrap_or(config.port);

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let url = format!("http://localhost:{}", listener.local_addr()?.port());
        println!("weekplan for {} → {url}", root_buf.display());

        tokio::select! {
            res = weekplan_server::serve_on(root_buf, listener, open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
