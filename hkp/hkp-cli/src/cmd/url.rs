use hkp_client::url::lookup_url;
use hkp_common::cli::CommandDefaults;

/// Print the lookup URL for a keyserver, without contacting it
#[derive(clap::Args, Debug)]
pub struct Url {
    /// The keyserver, either a host or a URL
    pub endpoint: String,

    /// Query parameters, as alternating keys and values
    pub query: Vec<String>,
}

impl CommandDefaults for Url {
    fn progress(&self) -> bool {
        false
    }
}

impl Url {
    pub fn run(self) -> anyhow::Result<()> {
        let url = lookup_url(&self.endpoint, &self.query)?;
        println!("{url}");
        Ok(())
    }
}
