//! `server.properties` and the Geyser config
//!
//! Both files come from a template patched with the user's overrides. Keys a
//! template does not have are reported and left out, never appended.

use std::path::Path;

use super::{PluginPlan, ServerInstaller};
use crate::error::{Result, SetupError};
use crate::net;
use crate::report::{self, Severity};
use crate::resolver::{Software, artifact};
use crate::template::{self, Overrides};

/// Vanilla defaults, as the server writes them on first start
pub const SERVER_PROPERTIES_TEMPLATE: &str = include_str!("../../templates/server.properties");

pub const SERVER_PROPERTIES: &str = "server.properties";

/// Where Geyser reads its config for each software
pub fn geyser_config_path(software: Software) -> Option<&'static Path> {
    match software {
        Software::Paper | Software::Spigot => Some(Path::new("plugins/Geyser-Spigot/config.yml")),
        Software::Fabric => Some(Path::new("config/Geyser-Fabric/config.yml")),
        Software::Vanilla => None,
    }
}

/// Patch `template` and report every override it has no line for
fn render(file: &str, template: &str, overrides: &Overrides) -> Result<String> {
    for key in template::unmatched_keys(template, overrides) {
        report::raise(
            Severity::Info,
            SetupError::UnknownTemplateKey {
                file: file.to_string(),
                key,
            },
        )?;
    }
    Ok(template::patch_text(template, overrides))
}

/// Write `server.properties` when there is anything to override
///
/// Without overrides the server generates the file itself on first start.
pub fn write_server_properties(installer: &mut ServerInstaller<'_>, overrides: &Overrides) -> Result<()> {
    if overrides.is_empty() {
        return Ok(());
    }
    let contents = render(SERVER_PROPERTIES, SERVER_PROPERTIES_TEMPLATE, overrides)?;
    installer.save(SERVER_PROPERTIES, contents)?;
    report::info("Wrote server.properties!");
    Ok(())
}

/// Write Geyser's `config.yml` when Geyser is installed and needs settings
///
/// Floodgate needs `remote.auth-type: floodgate`, which is added unless the
/// user set an auth type. A template that cannot be downloaded is a warning:
/// Geyser then writes its own defaults on first start.
pub fn write_geyser_config(
    installer: &mut ServerInstaller<'_>,
    software: Software,
    plan: PluginPlan,
    overrides: &Overrides,
) -> Result<()> {
    let Some(path) = geyser_config_path(software) else {
        return Ok(());
    };
    if !plan.geyser {
        return Ok(());
    }

    let mut overrides = overrides.clone();
    if plan.floodgate {
        overrides
            .entry("remote.auth-type".to_string())
            .or_insert_with(|| "floodgate".to_string());
    }
    if overrides.is_empty() {
        return Ok(());
    }

    let Some(body) = net::fetch_optional(
        installer.fetcher(),
        artifact::GEYSER_CONFIG_TEMPLATE_URL,
        "Geyser config template",
        Severity::Warn,
    )?
    else {
        return Ok(());
    };

    let template = match String::from_utf8(body) {
        Ok(template) => template,
        Err(e) => {
            report::raise(
                Severity::Warn,
                SetupError::UnexpectedResponse {
                    resource: "Geyser config template".to_string(),
                    reason: e.to_string(),
                },
            )?;
            return Ok(());
        }
    };
    let contents = render("Geyser config", &template, &overrides)?;
    installer.save(path, contents)?;
    report::info("Wrote Geyser config!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_common_keys() {
        let overrides: Overrides = ["server-port", "max-players", "motd", "online-mode", "query.port"]
            .iter()
            .map(|k| ((*k).to_string(), String::new()))
            .collect();
        assert!(template::unmatched_keys(SERVER_PROPERTIES_TEMPLATE, &overrides).is_empty());
    }

    #[test]
    fn test_render_port() {
        let overrides = Overrides::from([("server-port".to_string(), "25570".to_string())]);
        let rendered = render(SERVER_PROPERTIES, SERVER_PROPERTIES_TEMPLATE, &overrides).unwrap();
        assert!(rendered.contains("\nserver-port=25570\n"));
        assert!(rendered.contains("\nquery.port=25565\n"));
        assert_eq!(
            rendered.lines().count(),
            SERVER_PROPERTIES_TEMPLATE.lines().count()
        );
    }

    #[test]
    fn test_render_unknown_key_is_not_fatal() {
        let overrides = Overrides::from([("no-such-key".to_string(), "1".to_string())]);
        let rendered = render(SERVER_PROPERTIES, SERVER_PROPERTIES_TEMPLATE, &overrides).unwrap();
        assert_eq!(rendered, SERVER_PROPERTIES_TEMPLATE);
    }

    #[test]
    fn test_geyser_config_paths() {
        assert_eq!(
            geyser_config_path(Software::Paper),
            Some(Path::new("plugins/Geyser-Spigot/config.yml"))
        );
        assert_eq!(
            geyser_config_path(Software::Fabric),
            Some(Path::new("config/Geyser-Fabric/config.yml"))
        );
        assert_eq!(geyser_config_path(Software::Vanilla), None);
    }
}
