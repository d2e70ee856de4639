//! PipelineIQ CLI
//!
//! Command-line front end for the attribution dashboard:
//! - Sign in, sign up, enter demo mode, log out
//! - Show dashboard panels (KPIs, funnel, channels, top campaigns)
//! - Browse campaigns, leads, companies and attribution results
//!
//! When the backend cannot be reached every panel still renders, from
//! sample data, with a notice saying so.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pipelineiq::auth::{self, Access, AuthFlow, Route, SignedIn};
use pipelineiq::client::{registry, Fetched, ResilientClient, DEFAULT_TOP_CAMPAIGNS};
use pipelineiq::config::{generate_default_config, Config, LoggingConfig};
use pipelineiq::dashboard::{Dashboard, View};
use pipelineiq::metrics::{format_currency, format_percentage};
use pipelineiq::models::AttributionModel;
use pipelineiq::session::{FileBackend, SessionStore};

#[derive(Parser)]
#[command(name = "pipelineiq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Revenue attribution dashboard in your terminal")]
#[command(long_about = "PipelineIQ shows campaign, funnel and revenue attribution data.\nWhen the backend is unreachable it falls back to sample data so every view still works.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and PIPELINEIQ_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Company to report on
    #[arg(short, long, default_value = "1", global = true)]
    pub company: i64,

    /// Attribution model (linear, first_touch, last_touch, time_decay)
    #[arg(short, long, default_value = "linear", global = true)]
    pub model: AttributionModel,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in (enters offline mode if the backend is unreachable)
    Login { email: String, password: String },

    /// Create an account and sign in
    Signup {
        email: String,
        password: String,
        /// Full name
        #[arg(long)]
        name: String,
    },

    /// Load demo data and enter the app
    Demo,

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// KPI overview
    Overview,

    /// Lead funnel
    Funnel,

    /// Attributed revenue by channel
    Channels,

    /// Best campaigns by ROAS
    TopCampaigns {
        #[arg(short, long, default_value_t = DEFAULT_TOP_CAMPAIGNS)]
        limit: u32,
    },

    /// Budget optimization recommendations
    Budget,

    /// Leads most likely to close
    Deals,

    /// Campaign performance table
    Campaigns,

    /// Leads of the company
    Leads,

    /// All companies
    Companies,

    /// Attribution results
    Attribution {
        #[command(subcommand)]
        command: AttributionCommand,
    },

    /// Seed the backend with demo data
    Seed,

    /// List backend endpoints
    Endpoints,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AttributionCommand {
    /// Attributed revenue totals under every model
    Summary,
    /// Attributed revenue per campaign
    Revenue,
    /// Recalculate attribution for one lead
    Calculate { lead_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Backend: {}", config.api.base_url);

    let session_path = config.session.path();
    let session = Arc::new(
        SessionStore::open(FileBackend::new(&session_path))
            .await
            .with_context(|| format!("Failed to open session at {:?}", session_path))?,
    );
    let client = ResilientClient::new(&config.api)?.with_session(Arc::clone(&session));
    let auth = AuthFlow::new(client.clone(), Arc::clone(&session));
    let dashboard = Dashboard::new(client.clone(), cli.company, cli.model);
    let json = cli.format == "json";

    match cli.command {
        Commands::Login { email, password } => {
            let signed_in = auth.login(&email, &password).await?;
            report_sign_in(&signed_in);
        }

        Commands::Signup {
            email,
            password,
            name,
        } => {
            let signed_in = auth.signup(&email, &password, &name).await?;
            report_sign_in(&signed_in);
        }

        Commands::Demo => {
            let signed_in = auth.demo().await?;
            report_sign_in(&signed_in);
        }

        Commands::Logout => {
            let route = auth.logout().await?;
            println!("Logged out (-> {})", route);
        }

        Commands::Whoami => {
            require(Route::Dashboard, &session).await?;
            let user = client.current_user().await;
            notice(&user);
            let user = user.value();
            println!(
                "{} <{}>{}",
                user.full_name.as_deref().unwrap_or("(no name)"),
                user.email,
                if session.is_offline().await { " [offline]" } else { "" }
            );
        }

        Commands::Overview => {
            require(Route::Dashboard, &session).await?;
            let view = dashboard.kpis().await;
            emit(json, &view, |rows| {
                table(
                    &["Metric", "Value"],
                    rows.iter()
                        .map(|c| vec![c.label.to_string(), c.value.clone()])
                        .collect(),
                )
            })?;
        }

        Commands::Funnel => {
            require(Route::Dashboard, &session).await?;
            let view = dashboard.funnel().await;
            emit(json, &view, |rows| {
                table(
                    &["Stage", "Count", "Conversion"],
                    rows.iter()
                        .map(|r| {
                            vec![
                                r.stage.clone(),
                                r.count.clone(),
                                r.conversion.clone().unwrap_or_else(|| "-".to_string()),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::Channels => {
            require(Route::Dashboard, &session).await?;
            let view = dashboard.channels().await;
            emit(json, &view, |rows| {
                table(
                    &["Channel", "Revenue", "Spend", "ROAS"],
                    rows.iter()
                        .map(|r| {
                            vec![
                                r.platform.clone(),
                                r.revenue.clone(),
                                r.spend.clone(),
                                r.roas.clone(),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::TopCampaigns { limit } => {
            require(Route::Dashboard, &session).await?;
            let view = dashboard.top_campaigns(limit).await;
            emit(json, &view, |rows| {
                table(
                    &["#", "Campaign", "Platform", "Spend", "Revenue", "ROAS"],
                    rows.iter()
                        .map(|r| {
                            vec![
                                r.rank.to_string(),
                                r.name.clone(),
                                r.platform.clone(),
                                r.spend.clone(),
                                r.revenue.clone(),
                                r.roas.clone(),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::Budget => {
            require(Route::Analytics, &session).await?;
            let view = dashboard.recommendations().await;
            emit(json, &view, |rows| {
                for r in rows {
                    println!(
                        "[{}] {} - {} ({} confidence)\n    {}",
                        r.priority, r.campaign, r.recommendation, r.confidence, r.action
                    );
                }
            })?;
        }

        Commands::Deals => {
            require(Route::Analytics, &session).await?;
            let deals = client.deal_probabilities(cli.company).await;
            emit_raw(json, &deals, |d| {
                table(
                    &["Lead", "Stage", "Deal Value", "Probability", "Touchpoints"],
                    d.high_probability_leads
                        .iter()
                        .map(|l| {
                            vec![
                                l.lead_name.clone(),
                                l.stage.clone(),
                                format_currency(l.deal_value),
                                format_percentage(l.probability),
                                l.num_touchpoints.to_string(),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::Campaigns => {
            require(Route::Campaigns, &session).await?;
            let view = dashboard.campaigns().await;
            emit(json, &view, |rows| {
                table(
                    &["Campaign", "Platform", "Budget", "Spend", "Used", "Impr.", "Clicks", "CTR", "CPC"],
                    rows.iter()
                        .map(|r| {
                            vec![
                                r.name.clone(),
                                r.platform.clone(),
                                r.budget.clone(),
                                r.spend.clone(),
                                r.budget_used.clone(),
                                r.impressions.clone(),
                                r.clicks.clone(),
                                r.ctr.clone(),
                                r.cpc.clone(),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::Leads => {
            require(Route::Analytics, &session).await?;
            let leads = client.leads_for_company(cli.company).await;
            emit_raw(json, &leads, |leads| {
                table(
                    &["ID", "Name", "Email", "Stage", "Deal Value", "Touchpoints"],
                    leads
                        .iter()
                        .map(|l| {
                            vec![
                                l.id.to_string(),
                                l.name.clone(),
                                l.email.clone(),
                                l.stage.clone(),
                                format_currency(l.deal_value),
                                l.touchpoints.len().to_string(),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::Companies => {
            require(Route::Analytics, &session).await?;
            let companies = client.companies().await;
            emit_raw(json, &companies, |companies| {
                table(
                    &["ID", "Name", "Industry", "Annual Ad Spend"],
                    companies
                        .iter()
                        .map(|c| {
                            vec![
                                c.id.to_string(),
                                c.name.clone(),
                                c.industry.clone(),
                                format_currency(c.annual_ad_spend),
                            ]
                        })
                        .collect(),
                )
            })?;
        }

        Commands::Attribution { command } => {
            require(Route::Analytics, &session).await?;
            match command {
                AttributionCommand::Summary => {
                    let summary = client.attribution_summary(cli.company).await;
                    emit_raw(json, &summary, |s| {
                        table(
                            &["Model", "Attributed Revenue", "Leads"],
                            AttributionModel::ALL
                                .iter()
                                .filter_map(|m| s.totals(*m).map(|t| (m, t)))
                                .map(|(m, t)| {
                                    vec![
                                        m.label().to_string(),
                                        format_currency(t.total_attributed_revenue),
                                        t.leads_attributed.to_string(),
                                    ]
                                })
                                .collect(),
                        )
                    })?;
                }
                AttributionCommand::Revenue => {
                    let revenue = client.attributed_revenue(cli.company, cli.model).await;
                    emit_raw(json, &revenue, |r| {
                        table(
                            &["Campaign", "Platform", "Attributed Revenue"],
                            r.data
                                .iter()
                                .map(|c| {
                                    vec![
                                        c.campaign_name.clone(),
                                        c.platform.clone(),
                                        format_currency(c.attributed_revenue),
                                    ]
                                })
                                .collect(),
                        )
                    })?;
                }
                AttributionCommand::Calculate { lead_id } => {
                    let result = client.calculate_attribution(lead_id, cli.model).await;
                    emit_raw(json, &result, |r| {
                        println!(
                            "Lead {} under {}: {} campaign(s) credited",
                            r.lead_id, r.model, r.attribution_count
                        );
                        table(
                            &["Campaign", "Weight", "Revenue"],
                            r.results
                                .iter()
                                .map(|s| {
                                    vec![
                                        s.campaign_id
                                            .map(|id| id.to_string())
                                            .unwrap_or_else(|| "-".to_string()),
                                        format_percentage(s.weighted_attribution * 100.0),
                                        format_currency(s.attributed_revenue),
                                    ]
                                })
                                .collect(),
                        )
                    })?;
                }
            }
        }

        Commands::Seed => {
            let seeded = client.seed().await;
            notice(&seeded);
            println!("{}", seeded.value().message);
        }

        Commands::Endpoints => {
            for descriptor in registry::ALL {
                println!("{:<22} {}", descriptor.name, descriptor);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            if let Some(path) = output {
                std::fs::write(&path, content)?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", content);
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pipelineiq={}", logging.level)));

    // Logs go to stderr; stdout carries command output
    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn require(route: Route, session: &SessionStore) -> anyhow::Result<()> {
    match auth::guard(route, session).await {
        Access::Allow => Ok(()),
        Access::Redirect(to) => {
            bail!(
                "Not signed in (redirect to {}). Run `pipelineiq login` or `pipelineiq demo` first.",
                to
            )
        }
    }
}

fn report_sign_in(signed_in: &SignedIn) {
    if signed_in.offline {
        match &signed_in.reason {
            Some(reason) => println!("Backend unavailable ({}); signed in to offline mode", reason),
            None => println!("Signed in to offline mode"),
        }
    } else {
        println!("Signed in");
    }
    println!("-> {}", signed_in.redirect);
}

fn notice<T>(fetched: &Fetched<T>) {
    if let Some(reason) = fetched.reason() {
        eprintln!("! Showing sample data: {}", reason);
    }
}

fn emit<T: Serialize, F: FnOnce(&T)>(json: bool, view: &View<T>, render: F) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        if let Some(notice) = &view.notice {
            eprintln!("! {}", notice);
        }
        render(&view.rows);
    }
    Ok(())
}

fn emit_raw<T: Serialize, F: FnOnce(&T)>(json: bool, fetched: &Fetched<T>, render: F) -> anyhow::Result<()> {
    let view = View {
        rows: fetched.value(),
        degraded: fetched.is_fallback(),
        notice: fetched.reason().map(|r| format!("Showing sample data: {}", r)),
    };
    emit(json, &view, |rows| render(*rows))
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, rows));
}

/// Left-aligned columns, two spaces apart, with a dashed rule under the header
fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push_str(&line(row));
    }
    out
}
