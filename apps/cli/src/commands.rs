use crate::args::Commands;
use anyhow::{Context, Result};
use chamber::Chamber;
use chamber::multidomains::Reverse;
use std::io::Write;

/// Runs one subcommand, writing its output to `out`.
pub(crate) fn run(chamber: &Chamber, command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Domains {} => list_domains(chamber, out),
        Commands::Domain { site_id } => show_domain(chamber, site_id, out),
        Commands::Reverse { name, site_id, add_domain, urlconf, args, kwargs, query } => {
            let mut target = Reverse::to(name).add_domain(add_domain);
            if let Some(site_id) = site_id {
                target = target.site_id(site_id);
            }
            if let Some(urlconf) = urlconf {
                target = target.urlconf(urlconf);
            }
            target = args.into_iter().fold(target, |t, v| t.arg(v));
            target = kwargs.into_iter().fold(target, |t, (k, v)| t.kwarg(k, v));
            target = query.into_iter().fold(target, |t, (k, v)| t.qs(k, v));

            let url = chamber.reverse(target).context("Failed to reverse url")?;
            writeln!(out, "{url}")?;
            Ok(())
        },
    }
}

fn list_domains(chamber: &Chamber, out: &mut impl Write) -> Result<()> {
    for (site_id, domain) in chamber.domains.iter() {
        writeln!(out, "{site_id}\t{}\t{}", domain.name(), domain.url())?;
    }
    Ok(())
}

fn show_domain(chamber: &Chamber, site_id: u32, out: &mut impl Write) -> Result<()> {
    let domain = chamber.domains.get(site_id)?;

    writeln!(out, "site_id: {site_id}")?;
    writeln!(out, "name: {}", domain.name())?;
    writeln!(out, "url: {}", domain.url())?;
    writeln!(out, "urlconf: {}", domain.urlconf())?;
    writeln!(out, "user_model: {}", domain.user_model())?;
    writeln!(out, "user_model_columns: {}", domain.user_model_columns().join(", "))?;
    Ok(())
}
