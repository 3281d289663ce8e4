//! Company page rendering. Pure string-in, string-out: the same profile and
//! competitor list always produce an identical document. Every embedded data
//! field is HTML-escaped, in text and attribute positions alike.

use crate::domain::company::{BondRecord, CompanyProfile, RatingRecord};

const PAGE_STYLE: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }

        .container {
            max-width: 1200px;
            margin: 0 auto;
        }

        h1 {
            text-align: center;
            color: white;
            margin-bottom: 30px;
            font-size: 2.5em;
            text-shadow: 2px 2px 4px rgba(0,0,0,0.3);
        }

        .sidebar {
            background: white;
            border-radius: 10px;
            padding: 20px;
            margin-bottom: 20px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }

        .sidebar h2 {
            color: #667eea;
            margin-bottom: 15px;
            font-size: 1.3em;
        }

        .section-nav {
            list-style: none;
        }

        .section-nav li {
            padding: 12px;
            margin-bottom: 8px;
            background: #f7f7f7;
            border-radius: 5px;
            cursor: pointer;
            transition: all 0.3s;
            border-left: 4px solid #667eea;
        }

        .section-nav li:hover {
            background: #e9ecef;
            transform: translateX(5px);
        }

        .section-nav li.active {
            background: #667eea;
            color: white;
            font-weight: bold;
        }

        .competitor-list {
            list-style: none;
            margin-top: 10px;
        }

        .competitor-list li {
            padding: 6px 4px;
            color: #495057;
        }

        .competitor-list input {
            margin-right: 8px;
        }

        .competitor-empty {
            color: #868e96;
            font-style: italic;
        }

        .content {
            display: grid;
            grid-template-columns: 250px 1fr;
            gap: 20px;
        }

        .main-content {
            background: white;
            border-radius: 10px;
            padding: 30px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }

        .section {
            display: none;
        }

        .section.active {
            display: block;
        }

        .section h2 {
            color: #667eea;
            margin-bottom: 20px;
            padding-bottom: 10px;
            border-bottom: 3px solid #667eea;
        }

        .info-grid {
            display: grid;
            gap: 15px;
            margin-top: 20px;
        }

        .info-item {
            padding: 15px;
            background: #f8f9fa;
            border-radius: 5px;
            border-left: 4px solid #667eea;
        }

        .info-item label {
            display: block;
            font-weight: bold;
            color: #495057;
            margin-bottom: 5px;
        }

        .info-item value {
            display: block;
            color: #212529;
            font-size: 1.1em;
        }

        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }

        th, td {
            padding: 12px;
            text-align: left;
            border-bottom: 1px solid #dee2e6;
        }

        th {
            background: #667eea;
            color: white;
            font-weight: bold;
        }

        tr:hover {
            background: #f8f9fa;
        }

        @media (max-width: 768px) {
            .content {
                grid-template-columns: 1fr;
            }

            h1 {
                font-size: 1.8em;
            }
        }
"#;

// The clicked nav element is passed in explicitly; no reliance on the
// ambient `event` global.
const PAGE_SCRIPT: &str = r#"
        function showSection(sectionId, item) {
            const sections = document.querySelectorAll('.section');
            sections.forEach(section => {
                section.classList.remove('active');
            });

            const navItems = document.querySelectorAll('.section-nav li');
            navItems.forEach(navItem => {
                navItem.classList.remove('active');
            });

            document.getElementById(sectionId).classList.add('active');
            item.classList.add('active');
        }
"#;

/// Escape a data field for embedding in HTML, safe for both text nodes and
/// double-quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_company_page(profile: &CompanyProfile, competitors: &[String]) -> String {
    let mut page = String::with_capacity(12 * 1024);

    page.push_str("<!DOCTYPE html>\n");
    page.push_str("<html lang=\"en\">\n<head>\n");
    page.push_str("    <meta charset=\"UTF-8\">\n");
    page.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str("    <title>Research Assistant - Company Information</title>\n");
    page.push_str("    <style>");
    page.push_str(PAGE_STYLE);
    page.push_str("    </style>\n</head>\n<body>\n");
    page.push_str("    <div class=\"container\">\n");
    page.push_str("        <h1>\u{1F50D} Research Assistant</h1>\n");
    page.push_str(
        "        <p style=\"text-align: center; color: white; margin-bottom: 30px; font-size: 1.2em;\">\n",
    );
    page.push_str("            Provides all the company information you need at your fingertips\n");
    page.push_str("        </p>\n");
    page.push_str("        <div class=\"content\">\n");
    page.push_str(&sidebar(competitors));
    page.push_str("            <div class=\"main-content\">\n");
    page.push_str(&basic_section(profile));
    page.push_str(&bond_section(&profile.bond_info));
    page.push_str(&ratings_section(&profile.ratings));
    page.push_str("            </div>\n");
    page.push_str("        </div>\n");
    page.push_str("    </div>\n");
    page.push_str("    <script>");
    page.push_str(PAGE_SCRIPT);
    page.push_str("    </script>\n</body>\n</html>\n");

    page
}

fn sidebar(competitors: &[String]) -> String {
    let mut out = String::new();
    out.push_str("            <div class=\"sidebar\">\n");
    out.push_str("                <h2>Sections</h2>\n");
    out.push_str("                <ul class=\"section-nav\">\n");
    out.push_str(
        "                    <li class=\"active\" onclick=\"showSection('basic', this)\">Basic Information</li>\n",
    );
    out.push_str(
        "                    <li onclick=\"showSection('bond', this)\">Bond Information</li>\n",
    );
    out.push_str(
        "                    <li onclick=\"showSection('ratings', this)\">Ratings Information</li>\n",
    );
    out.push_str("                </ul>\n");
    out.push_str("                <h2>Competitors</h2>\n");
    out.push_str(&competitor_block(competitors));
    out.push_str("            </div>\n");
    out
}

fn competitor_block(competitors: &[String]) -> String {
    if competitors.is_empty() {
        return "                <p class=\"competitor-empty\">No competitors available</p>\n"
            .to_string();
    }

    let mut out = String::new();
    out.push_str("                <ul class=\"competitor-list\">\n");
    for symbol in competitors {
        let symbol = escape_html(symbol);
        out.push_str(&format!(
            "                    <li><label><input type=\"checkbox\" name=\"competitor\" value=\"{symbol}\"> {symbol}</label></li>\n",
        ));
    }
    out.push_str("                </ul>\n");
    out
}

fn basic_section(profile: &CompanyProfile) -> String {
    let mut out = String::new();
    out.push_str("                <div id=\"basic\" class=\"section active\">\n");
    out.push_str("                    <h2>Basic Information</h2>\n");
    out.push_str("                    <div class=\"info-grid\">\n");
    out.push_str(&info_item("Company Name:", &profile.company_name));
    out.push_str(&info_item("Annual Revenue:", &profile.annual_revenue));
    out.push_str(&info_item("Annual Profit:", &profile.annual_profit));
    out.push_str("                    </div>\n");
    out.push_str("                </div>\n");
    out
}

fn info_item(label: &str, value: &str) -> String {
    let mut out = String::new();
    out.push_str("                        <div class=\"info-item\">\n");
    out.push_str(&format!("                            <label>{label}</label>\n"));
    out.push_str(&format!(
        "                            <value>{}</value>\n",
        escape_html(value)
    ));
    out.push_str("                        </div>\n");
    out
}

fn bond_section(bonds: &[BondRecord]) -> String {
    let mut out = String::new();
    out.push_str("                <div id=\"bond\" class=\"section\">\n");
    out.push_str("                    <h2>Bond Information</h2>\n");
    out.push_str("                    <table>\n");
    out.push_str("                        <thead>\n");
    out.push_str("                            <tr>\n");
    out.push_str("                                <th>Issuer</th>\n");
    out.push_str("                                <th>Maturity Date</th>\n");
    out.push_str("                                <th>Coupon Rate</th>\n");
    out.push_str("                                <th>Rating</th>\n");
    out.push_str("                            </tr>\n");
    out.push_str("                        </thead>\n");
    out.push_str("                        <tbody>\n");
    for bond in bonds {
        out.push_str("                            <tr>\n");
        out.push_str(&table_cell(&bond.issuer));
        out.push_str(&table_cell(&bond.maturity));
        out.push_str(&table_cell(&bond.coupon));
        out.push_str(&table_cell(&bond.rating));
        out.push_str("                            </tr>\n");
    }
    out.push_str("                        </tbody>\n");
    out.push_str("                    </table>\n");
    out.push_str("                </div>\n");
    out
}

fn ratings_section(ratings: &[RatingRecord]) -> String {
    let mut out = String::new();
    out.push_str("                <div id=\"ratings\" class=\"section\">\n");
    out.push_str("                    <h2>Ratings Information</h2>\n");
    out.push_str("                    <table>\n");
    out.push_str("                        <thead>\n");
    out.push_str("                            <tr>\n");
    out.push_str("                                <th>Rating Agency</th>\n");
    out.push_str("                                <th>Rating</th>\n");
    out.push_str("                                <th>Outlook</th>\n");
    out.push_str("                            </tr>\n");
    out.push_str("                        </thead>\n");
    out.push_str("                        <tbody>\n");
    for rating in ratings {
        out.push_str("                            <tr>\n");
        out.push_str(&table_cell(&rating.agency));
        out.push_str(&table_cell(&rating.rating));
        out.push_str(&table_cell(&rating.outlook));
        out.push_str("                            </tr>\n");
    }
    out.push_str("                        </tbody>\n");
    out.push_str("                    </table>\n");
    out.push_str("                </div>\n");
    out
}

fn table_cell(value: &str) -> String {
    format!("                                <td>{}</td>\n", escape_html(value))
}
