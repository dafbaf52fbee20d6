//! Content catalog
//!
//! The static, language-keyed source of everything the terminal displays:
//! flat interface strings, section titles, and the structured records behind
//! the richer sections (experience, education, skills, certifications,
//! contact, help). Built once at startup and read-only afterwards.
//!
//! Strings may carry the markup understood by `core::markup` (`<hl>`,
//! `<title>`, `<link>`, ...); the section renderers in `core::session` wrap
//! the structured records in markup themselves.

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Es];

    /// Two-letter code used in config files and the window title.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }

    /// Label shown on the language selector.
    pub fn label(self) -> &'static str {
        match self {
            Lang::En => "EN",
            Lang::Es => "ES",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "es" => Some(Lang::Es),
            _ => None,
        }
    }

    /// The other language, for the toggle key.
    pub fn other(self) -> Self {
        match self {
            Lang::En => Lang::Es,
            Lang::Es => Lang::En,
        }
    }
}

/// Keys for the flat interface strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Welcome,
    CommandNotFound,
    Footer,
    ExperienceTitle,
    EducationTitle,
    SkillsTitle,
    CertsTitle,
    ContactTitle,
    ContactNote,
    HelpTitle,
}

/// Biography fields behind `whoami`.
pub struct Bio {
    pub name: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub role: &'static str,
    pub focus: &'static str,
    /// Markup paragraph.
    pub summary: &'static str,
}

/// A single position held at an employer.
pub struct Role {
    pub title: &'static str,
    pub period: &'static str,
    pub duration: &'static str,
    pub location: &'static str,
    pub current: bool,
    pub tasks: Vec<&'static str>,
}

/// An employer and the roles held there, newest first.
pub struct Employer {
    pub company: &'static str,
    pub roles: Vec<Role>,
}

pub struct EducationRecord {
    pub degree: &'static str,
    pub school: &'static str,
    pub year: &'static str,
    pub skills: Vec<&'static str>,
}

pub struct Skill {
    pub name: &'static str,
    /// 0-100, drives the skill-bar fill.
    pub level: u8,
}

pub struct SkillCategory {
    pub name: &'static str,
    pub skills: Vec<Skill>,
}

pub struct Certification {
    pub name: &'static str,
    pub issuer: &'static str,
    pub date: &'static str,
    pub credential_id: &'static str,
}

pub struct ContactLink {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub url: &'static str,
}

pub struct HelpEntry {
    pub command: &'static str,
    pub description: &'static str,
}

/// Everything displayable in one language.
pub struct LangBundle {
    pub welcome: &'static str,
    pub command_not_found: &'static str,
    pub footer: &'static str,
    pub experience_title: &'static str,
    pub education_title: &'static str,
    pub skills_title: &'static str,
    pub certs_title: &'static str,
    pub contact_title: &'static str,
    pub contact_note: &'static str,
    pub help_title: &'static str,
    pub bio: Bio,
    pub employers: Vec<Employer>,
    pub education: Vec<EducationRecord>,
    pub skill_categories: Vec<SkillCategory>,
    pub certifications: Vec<Certification>,
    pub contacts: Vec<ContactLink>,
    pub help: Vec<HelpEntry>,
}

/// The language-keyed catalog.
pub struct Catalog {
    en: LangBundle,
    es: LangBundle,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            en: english(),
            es: spanish(),
        }
    }

    /// The full bundle for a language.
    pub fn bundle(&self, lang: Lang) -> &LangBundle {
        match lang {
            Lang::En => &self.en,
            Lang::Es => &self.es,
        }
    }

    /// Flat string lookup.
    pub fn translate(&self, lang: Lang, key: TextKey) -> &str {
        let b = self.bundle(lang);
        match key {
            TextKey::Welcome => b.welcome,
            TextKey::CommandNotFound => b.command_not_found,
            TextKey::Footer => b.footer,
            TextKey::ExperienceTitle => b.experience_title,
            TextKey::EducationTitle => b.education_title,
            TextKey::SkillsTitle => b.skills_title,
            TextKey::CertsTitle => b.certs_title,
            TextKey::ContactTitle => b.contact_title,
            TextKey::ContactNote => b.contact_note,
            TextKey::HelpTitle => b.help_title,
        }
    }
}

fn english() -> LangBundle {
    LangBundle {
        welcome: "Welcome to the portfolio of <hl>Jordi Ferrer Molins</hl>\n\
                  Systems & Infrastructure Engineer\n\
                  \n\
                  Type a command or click the buttons below.\n\
                  Use <hl>help</hl> to list the available commands.",
        command_not_found: "command not found. Type <hl>help</hl> to list the available commands.",
        footer: "Powered by coffee and cron jobs",
        experience_title: "Work Experience",
        education_title: "Education",
        skills_title: "Technical Skills",
        certs_title: "Certifications",
        contact_title: "Contact",
        contact_note: "The fastest way to reach me is a LinkedIn message.",
        help_title: "Available commands:",
        bio: Bio {
            name: "JORDI FERRER MOLINS",
            title: "Systems & Infrastructure Engineer",
            location: "Girona, Catalonia",
            role: "Infrastructure Team Lead @ Nexiona Cloud",
            focus: "Systems administration & infrastructure automation",
            summary: "Systems engineer focused on keeping fleets of servers boring\n\
                      and predictable. I automate everything that gets done twice,\n\
                      document everything that gets asked twice, and treat\n\
                      monitoring graphs as bedtime reading.\n\
                      \n\
                      <hl>15+ years</hl> running production infrastructure.",
        },
        employers: vec![
            Employer {
                company: "Nexiona Cloud",
                roles: vec![
                    Role {
                        title: "Infrastructure Team Lead",
                        period: "2021 - present",
                        duration: "4 yrs",
                        location: "Girona, Catalonia · Remote",
                        current: true,
                        tasks: vec![
                            "Lead a team of four systems engineers running 300+ virtual machines",
                            "Own the incident process and the on-call rotation",
                            "Migrated the provisioning pipeline to Ansible and Terraform",
                            "Capacity planning and cost reporting for the hosting platform",
                        ],
                    },
                    Role {
                        title: "Systems Administrator",
                        period: "2018 - 2021",
                        duration: "3 yrs",
                        location: "Girona, Catalonia",
                        current: false,
                        tasks: vec![
                            "Operated Proxmox clusters and a Ceph storage backend",
                            "Built the backup and restore tooling around Borg and ZFS snapshots",
                            "Hardened the edge: WireGuard, nftables, fail2ban",
                        ],
                    },
                ],
            },
            Employer {
                company: "Velatec Serveis",
                roles: vec![Role {
                    title: "IT Technician",
                    period: "2014 - 2018",
                    duration: "4 yrs",
                    location: "Figueres, Catalonia",
                    current: false,
                    tasks: vec![
                        "Maintained Windows and Linux workstations for small businesses",
                        "Deployed and supported on-premise mail and file servers",
                        "First-line support and incident tracking",
                    ],
                }],
            },
        ],
        education: vec![
            EducationRecord {
                degree: "BSc Computer Engineering",
                school: "Universitat de Girona (UdG)",
                year: "2016 - 2020",
                skills: vec![
                    "Operating systems",
                    "Networking",
                    "Databases",
                    "Distributed systems",
                    "Security",
                ],
            },
            EducationRecord {
                degree: "CFGS Network Systems Administration",
                school: "Institut Montilivi",
                year: "2012 - 2014",
                skills: vec!["Linux", "Windows Server", "Routing", "Virtualization"],
            },
        ],
        skill_categories: vec![
            SkillCategory {
                name: "Operating Systems",
                skills: vec![
                    Skill { name: "GNU/Linux", level: 95 },
                    Skill { name: "Windows Server", level: 80 },
                    Skill { name: "FreeBSD", level: 60 },
                ],
            },
            SkillCategory {
                name: "Infrastructure",
                skills: vec![
                    Skill { name: "Proxmox / KVM", level: 90 },
                    Skill { name: "Ansible", level: 85 },
                    Skill { name: "Terraform", level: 70 },
                    Skill { name: "Docker", level: 80 },
                ],
            },
            SkillCategory {
                name: "Networking & Security",
                skills: vec![
                    Skill { name: "WireGuard / VPNs", level: 85 },
                    Skill { name: "nftables", level: 80 },
                    Skill { name: "Monitoring (Prometheus)", level: 75 },
                ],
            },
            SkillCategory {
                name: "Scripting",
                skills: vec![
                    Skill { name: "Bash", level: 90 },
                    Skill { name: "Python", level: 75 },
                    Skill { name: "PowerShell", level: 60 },
                ],
            },
        ],
        certifications: vec![
            Certification {
                name: "LPIC-2 Linux Engineer",
                issuer: "Linux Professional Institute",
                date: "March 2022",
                credential_id: "LPI-2043187",
            },
            Certification {
                name: "AWS Certified SysOps Administrator",
                issuer: "Amazon Web Services",
                date: "October 2021",
                credential_id: "AWS-SOA-91MC4",
            },
            Certification {
                name: "Certified Kubernetes Administrator",
                issuer: "Cloud Native Computing Foundation",
                date: "June 2023",
                credential_id: "CKA-2300-8841",
            },
        ],
        contacts: vec![
            ContactLink {
                icon: "💼",
                label: "LinkedIn",
                value: "linkedin.com/in/jordiferrermolins",
                url: "https://www.linkedin.com/in/jordiferrermolins/",
            },
            ContactLink {
                icon: "🐙",
                label: "GitHub",
                value: "github.com/jferrermolins",
                url: "https://github.com/jferrermolins",
            },
        ],
        help: vec![
            HelpEntry { command: "whoami", description: "About me" },
            HelpEntry { command: "experience", description: "Work experience" },
            HelpEntry { command: "education", description: "Education" },
            HelpEntry { command: "skills", description: "Technical skills" },
            HelpEntry { command: "certs", description: "Certifications" },
            HelpEntry { command: "contact", description: "Contact details" },
            HelpEntry { command: "help", description: "Show this help" },
            HelpEntry { command: "clear", description: "Clear the terminal" },
        ],
    }
}

fn spanish() -> LangBundle {
    LangBundle {
        welcome: "Bienvenido al portfolio de <hl>Jordi Ferrer Molins</hl>\n\
                  Ingeniero de Sistemas e Infraestructura\n\
                  \n\
                  Escribe un comando o haz clic en los botones de abajo.\n\
                  Usa <hl>help</hl> para ver los comandos disponibles.",
        command_not_found: "comando no encontrado. Escribe <hl>help</hl> para ver los comandos disponibles.",
        footer: "Funciona a base de café y tareas cron",
        experience_title: "Experiencia Laboral",
        education_title: "Formación Académica",
        skills_title: "Habilidades Técnicas",
        certs_title: "Certificaciones",
        contact_title: "Contacto",
        contact_note: "La forma más rápida de contactar conmigo es un mensaje por LinkedIn.",
        help_title: "Comandos disponibles:",
        bio: Bio {
            name: "JORDI FERRER MOLINS",
            title: "Ingeniero de Sistemas e Infraestructura",
            location: "Girona, Cataluña",
            role: "Responsable de Infraestructura @ Nexiona Cloud",
            focus: "Administración de sistemas y automatización de infraestructura",
            summary: "Ingeniero de sistemas centrado en mantener flotas de servidores\n\
                      aburridas y predecibles. Automatizo todo lo que se hace dos\n\
                      veces, documento todo lo que se pregunta dos veces y leo\n\
                      gráficas de monitorización antes de dormir.\n\
                      \n\
                      <hl>Más de 15 años</hl> operando infraestructura en producción.",
        },
        employers: vec![
            Employer {
                company: "Nexiona Cloud",
                roles: vec![
                    Role {
                        title: "Responsable de Infraestructura",
                        period: "2021 - actualidad",
                        duration: "4 años",
                        location: "Girona, Cataluña · Remoto",
                        current: true,
                        tasks: vec![
                            "Lidero un equipo de cuatro ingenieros con más de 300 máquinas virtuales",
                            "Responsable del proceso de incidencias y del turno de guardias",
                            "Migración del aprovisionamiento a Ansible y Terraform",
                            "Planificación de capacidad y costes de la plataforma de hosting",
                        ],
                    },
                    Role {
                        title: "Administrador de Sistemas",
                        period: "2018 - 2021",
                        duration: "3 años",
                        location: "Girona, Cataluña",
                        current: false,
                        tasks: vec![
                            "Operación de clústeres Proxmox con almacenamiento Ceph",
                            "Herramientas de copia y restauración con Borg y snapshots ZFS",
                            "Securización del perímetro: WireGuard, nftables, fail2ban",
                        ],
                    },
                ],
            },
            Employer {
                company: "Velatec Serveis",
                roles: vec![Role {
                    title: "Técnico Informático",
                    period: "2014 - 2018",
                    duration: "4 años",
                    location: "Figueres, Cataluña",
                    current: false,
                    tasks: vec![
                        "Mantenimiento de estaciones Windows y Linux para pymes",
                        "Despliegue y soporte de servidores de correo y ficheros",
                        "Soporte de primer nivel y gestión de incidencias",
                    ],
                }],
            },
        ],
        education: vec![
            EducationRecord {
                degree: "Grado en Ingeniería Informática",
                school: "Universitat de Girona (UdG)",
                year: "2016 - 2020",
                skills: vec![
                    "Sistemas operativos",
                    "Redes",
                    "Bases de datos",
                    "Sistemas distribuidos",
                    "Seguridad",
                ],
            },
            EducationRecord {
                degree: "CFGS Administración de Sistemas en Red",
                school: "Institut Montilivi",
                year: "2012 - 2014",
                skills: vec!["Linux", "Windows Server", "Enrutamiento", "Virtualización"],
            },
        ],
        skill_categories: vec![
            SkillCategory {
                name: "Sistemas Operativos",
                skills: vec![
                    Skill { name: "GNU/Linux", level: 95 },
                    Skill { name: "Windows Server", level: 80 },
                    Skill { name: "FreeBSD", level: 60 },
                ],
            },
            SkillCategory {
                name: "Infraestructura",
                skills: vec![
                    Skill { name: "Proxmox / KVM", level: 90 },
                    Skill { name: "Ansible", level: 85 },
                    Skill { name: "Terraform", level: 70 },
                    Skill { name: "Docker", level: 80 },
                ],
            },
            SkillCategory {
                name: "Redes y Seguridad",
                skills: vec![
                    Skill { name: "WireGuard / VPNs", level: 85 },
                    Skill { name: "nftables", level: 80 },
                    Skill { name: "Monitorización (Prometheus)", level: 75 },
                ],
            },
            SkillCategory {
                name: "Scripting",
                skills: vec![
                    Skill { name: "Bash", level: 90 },
                    Skill { name: "Python", level: 75 },
                    Skill { name: "PowerShell", level: 60 },
                ],
            },
        ],
        certifications: vec![
            Certification {
                name: "LPIC-2 Linux Engineer",
                issuer: "Linux Professional Institute",
                date: "Marzo 2022",
                credential_id: "LPI-2043187",
            },
            Certification {
                name: "AWS Certified SysOps Administrator",
                issuer: "Amazon Web Services",
                date: "Octubre 2021",
                credential_id: "AWS-SOA-91MC4",
            },
            Certification {
                name: "Certified Kubernetes Administrator",
                issuer: "Cloud Native Computing Foundation",
                date: "Junio 2023",
                credential_id: "CKA-2300-8841",
            },
        ],
        contacts: vec![
            ContactLink {
                icon: "💼",
                label: "LinkedIn",
                value: "linkedin.com/in/jordiferrermolins",
                url: "https://www.linkedin.com/in/jordiferrermolins/",
            },
            ContactLink {
                icon: "🐙",
                label: "GitHub",
                value: "github.com/jferrermolins",
                url: "https://github.com/jferrermolins",
            },
        ],
        help: vec![
            HelpEntry { command: "whoami", description: "Información sobre mí" },
            HelpEntry { command: "experience", description: "Experiencia laboral" },
            HelpEntry { command: "education", description: "Formación académica" },
            HelpEntry { command: "skills", description: "Habilidades técnicas" },
            HelpEntry { command: "certs", description: "Certificaciones" },
            HelpEntry { command: "contact", description: "Información de contacto" },
            HelpEntry { command: "help", description: "Mostrar esta ayuda" },
            HelpEntry { command: "clear", description: "Limpiar el terminal" },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_codes_round_trip() {
        for lang in Lang::ALL {
            assert_eq!(Lang::parse(lang.code()), Some(lang));
        }
        assert_eq!(Lang::parse("EN"), Some(Lang::En));
        assert_eq!(Lang::parse("fr"), None);
    }

    #[test]
    fn both_bundles_cover_every_command() {
        let catalog = Catalog::new();
        for lang in Lang::ALL {
            let commands: Vec<&str> = catalog
                .bundle(lang)
                .help
                .iter()
                .map(|e| e.command)
                .collect();
            assert_eq!(
                commands,
                [
                    "whoami",
                    "experience",
                    "education",
                    "skills",
                    "certs",
                    "contact",
                    "help",
                    "clear"
                ]
            );
        }
    }

    #[test]
    fn translate_returns_language_specific_text() {
        let catalog = Catalog::new();
        let en = catalog.translate(Lang::En, TextKey::HelpTitle);
        let es = catalog.translate(Lang::Es, TextKey::HelpTitle);
        assert_ne!(en, es);
        assert!(!en.is_empty() && !es.is_empty());
    }

    #[test]
    fn skill_levels_stay_in_range() {
        let catalog = Catalog::new();
        for lang in Lang::ALL {
            for cat in &catalog.bundle(lang).skill_categories {
                for skill in &cat.skills {
                    assert!(skill.level <= 100, "{} out of range", skill.name);
                }
            }
        }
    }
}
