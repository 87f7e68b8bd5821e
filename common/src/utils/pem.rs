use anyhow::Context;
use reqwest::Certificate;
use std::path::Path;

/// Add all certificates of a PEM file as root certificates to the client.
pub fn add_cert<P: AsRef<Path>>(
    mut client: reqwest::ClientBuilder,
    cert: P,
) -> anyhow::Result<reqwest::ClientBuilder> {
    let cert = cert.as_ref();
    log::debug!("Adding root certificates from: {}", cert.display());

    let buf = std::fs::read(cert)
        .with_context(|| format!("Reading certificate: {}", cert.display()))?;

    let pems = pem::parse_many(buf)
        .with_context(|| format!("Parsing certificate: {}", cert.display()))?;
    let pems = pems
        .into_iter()
        .map(|pem| Certificate::from_pem(&pem::encode(&pem).into_bytes()).map_err(|err| err.into()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    log::debug!("Found {} certificates", pems.len());

    if pems.is_empty() {
        anyhow::bail!("No certificates found in: {}", cert.display());
    }

    for pem in pems {
        client = client.add_root_certificate(pem);
    }

    Ok(client)
}
