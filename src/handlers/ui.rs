use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = include_str!("../../assets/app.css");
const SCRIPT: &str = include_str!("../../assets/app.js");

const APP_ICON: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Crect x='0' y='0' width='100' height='100' fill='%23fafafa'/%3E%3Crect x='20' y='30' width='60' height='50' rx='4' fill='%23222'/%3E%3Crect x='20' y='20' width='30' height='15' rx='3' fill='%23222'/%3E%3C/svg%3E";

/// Serves the single-page client. Styles and script are inlined so the page
/// works from one request.
pub async fn index() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no, viewport-fit=cover";
                meta name="theme-color" content="#fafafa";
                meta name="apple-mobile-web-app-capable" content="yes";
                title { "📁" }
                link rel="icon" type="image/svg+xml" href=(APP_ICON);
                link rel="apple-touch-icon" href=(APP_ICON);
                style { (PreEscaped(STYLES)) }
            }
            body {
                div class="app" {
                    div class="header" {
                        div #mainTitle class="title" { "Files ↔ Phone" }
                    }

                    // Send files to the other side
                    div #uploadSection class="section" {
                        div #uploadSectionTitle class="section-title" { "Send to Phone" }
                        div class="card upload-area" {
                            button #uploadBtn class="upload-btn" aria-label="Choose files" {}
                            div class="upload-hint" { "Tap to choose files" }
                            div #pendingFiles class="pending-files" {}
                            button #sendBtn class="send-all-btn" style="display: none;" { "Send" }
                        }
                    }

                    // Files already on the PC
                    div #downloadSection class="section" {
                        div #downloadSectionTitle class="section-title" { "Download from PC" }
                        div #pcFiles class="card file-list" {
                            div class="empty-state" { "Loading..." }
                        }
                        button #refreshBtn class="refresh-btn" { "↻ Refresh" }
                    }

                    div #textSection class="section" {
                        div class="section-title" { "Shared Text" }
                        div class="card text-area" {
                            textarea #syncText rows="4" placeholder="Type or paste text to share..." {}
                            div class="row" {
                                button #pullTextBtn class="secondary-btn" { "Get" }
                                button #copyTextBtn class="secondary-btn" { "Copy" }
                                button #pushTextBtn class="primary-btn" { "Share" }
                            }
                        }
                    }

                    div #clipboardSection class="section" {
                        div class="section-title" { "Image to PC Clipboard" }
                        div class="card clipboard-area" {
                            button #clipboardBtn class="primary-btn" { "Choose image" }
                            div class="upload-hint" { "The image lands on the PC clipboard, ready to paste" }
                        }
                    }

                    input #fileInput type="file" multiple;
                    input #imageInput type="file" accept="image/*";

                    div #status {}

                    div #hintText class="hint" {
                        "Files sync between your phone and PC Downloads"
                    }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}
