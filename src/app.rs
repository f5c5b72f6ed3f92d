use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use yew::format::Json;
use yew::prelude::*;
use yew::services::reader::{File, FileData, ReaderService, ReaderTask};
use yew::services::storage::{Area, StorageService};

use crate::{trigger_download, DownloadError, DEFAULT_MIME_TYPE};

const LS_SAVER_PREFS: &str = "saver-prefs";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SaverPrefs {
    pub file_name: String,
    pub mime_type: String,
}

impl Default for SaverPrefs {
    fn default() -> SaverPrefs {
        SaverPrefs {
            file_name: "untitled.txt".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Display, EnumIter)]
enum MimePreset {
    #[strum(serialize = "text/plain")]
    PlainText,
    #[strum(serialize = "text/csv")]
    Csv,
    #[strum(serialize = "application/json")]
    Json,
    #[strum(serialize = "application/octet-stream")]
    OctetStream,
}

pub struct App {
    link: ComponentLink<Self>,
    storage: StorageService,
    reader: ReaderService,
    reader_tasks: Vec<ReaderTask>,
    state: State,
}

pub struct State {
    prefs: SaverPrefs,
    text: String,
    loaded: Option<LoadedFile>,
    pending_mime: Option<String>,
    last_download: Option<String>,
    error_message: Option<String>,
}

struct LoadedFile {
    name: String,
    mime_type: String,
    content: Vec<u8>,
}

pub enum Msg {
    SetFileName(String),
    MimeTypeSelected(String),
    SetText(String),
    InFileSelected(File),
    InFileLoaded(FileData),
    SaveText,
    SaveCopy,
    Noop,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_props: Self::Properties, link: ComponentLink<Self>) -> Self {
        let storage = StorageService::new(Area::Local).unwrap();
        let prefs = {
            if let Json(Ok(restored_prefs)) = storage.restore(LS_SAVER_PREFS) {
                restored_prefs
            } else {
                SaverPrefs::default()
            }
        };
        let state = State {
            prefs,
            text: String::new(),
            loaded: None,
            pending_mime: None,
            last_download: None,
            error_message: None,
        };
        App {
            link,
            storage,
            reader: ReaderService::new(),
            reader_tasks: Vec::new(),
            state,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::SetFileName(file_name) => {
                self.state.prefs.file_name = file_name;
                self.store_prefs();
            }
            Msg::MimeTypeSelected(mime_type) => {
                if mime_type == "custom" {
                    let window = web_sys::window().expect("window not available");
                    if let Some(mime_type) = window
                        .prompt_with_message_and_default(
                            "Please enter a MIME type:",
                            &self.state.prefs.mime_type,
                        )
                        .expect("prompt not available")
                    {
                        self.state.prefs.mime_type = mime_type;
                        self.store_prefs();
                    }
                } else if !mime_type.is_empty() {
                    self.state.prefs.mime_type = mime_type;
                    self.store_prefs();
                }
            }
            Msg::SetText(text) => {
                self.state.text = text;
            }
            Msg::InFileSelected(file) => {
                self.state.pending_mime = Some(file.type_());
                let callback = self.link.callback(Msg::InFileLoaded);
                let reader_task = self.reader.read_file(file, callback).unwrap();
                self.reader_tasks.push(reader_task);
            }
            Msg::InFileLoaded(file_data) => {
                let mime_type = self
                    .state
                    .pending_mime
                    .take()
                    .filter(|mime_type| !mime_type.is_empty())
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
                self.state.loaded = Some(LoadedFile {
                    name: file_data.name,
                    mime_type,
                    content: file_data.content,
                });
            }
            Msg::SaveText => {
                let result = trigger_download(
                    self.state.text.as_str(),
                    &self.state.prefs.file_name,
                    Some(&self.state.prefs.mime_type),
                );
                self.finish_download(self.state.prefs.file_name.clone(), result);
            }
            Msg::SaveCopy => {
                if let Some(loaded) = self.state.loaded.as_ref() {
                    let file_name = loaded.name.clone();
                    let mime_type = loaded.mime_type.clone();
                    let content = loaded.content.clone();
                    let result = trigger_download(content, &file_name, Some(&mime_type));
                    self.finish_download(file_name, result);
                }
            }
            Msg::Noop => {}
        }
        true
    }

    fn change(&mut self, _props: Self::Properties) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        let oninput_file_name = self
            .link
            .callback(|input: yew::html::InputData| Msg::SetFileName(input.value));
        let oninput_text = self
            .link
            .callback(|input: yew::html::InputData| Msg::SetText(input.value));
        let onchange_mime_type = self
            .link
            .callback(|event: yew::html::ChangeData| match event {
                yew::html::ChangeData::Select(select) => Msg::MimeTypeSelected(select.value()),
                _ => Msg::Noop,
            });
        let onchange_in_file = self
            .link
            .callback(|event: yew::html::ChangeData| match event {
                yew::html::ChangeData::Files(files) => match files.get(0) {
                    Some(file) => Msg::InFileSelected(file),
                    None => Msg::Noop,
                },
                _ => Msg::Noop,
            });
        let onclick_save_text = self.link.callback(|_| Msg::SaveText);
        let onclick_save_copy = self.link.callback(|_| Msg::SaveCopy);

        let render_error_message = if let Some(error_message) = self.state.error_message.as_ref() {
            html! {<div class="error">{error_message}</div>}
        } else {
            html! {}
        };

        let render_message = if let Some(file_name) = self.state.last_download.as_ref() {
            html! {<div class="inline success">{format!("✔ Download started: {}", file_name)}</div>}
        } else {
            html! {}
        };

        let render_status = if let Some(loaded) = self.state.loaded.as_ref() {
            html! {
                <div class="status">
                    {format!("Loaded {} ({} bytes, {})", loaded.name, loaded.content.len(), loaded.mime_type)}
                </div>
            }
        } else {
            html! {}
        };

        html! {
            <main>
                {render_error_message}
                <div>
                    <span class="form">{"File name:"}</span>
                    <input class="inline" type="text" value=&self.state.prefs.file_name oninput=oninput_file_name/>
                </div>
                <div>
                    <span class="form">{"Content type:"}</span>
                    {self.render_mime_select(onchange_mime_type)}
                </div>
                <br/>
                <textarea class="content" rows="10" value=&self.state.text oninput=oninput_text/>
                <br/>
                <div>
                    <button class="main" onclick=onclick_save_text>{"Save text"}</button>
                    {render_message}
                </div>
                <br/>
                <div>
                    <span class="form">{"Local file:"}</span>
                    <input class="inline" type="file" onchange=onchange_in_file/>
                    <button onclick=onclick_save_copy disabled=self.state.loaded.is_none()>
                        {"Save a copy"}
                    </button>
                </div>
                {render_status}
            </main>
        }
    }
}

impl App {
    fn store_prefs(&mut self) {
        self.storage.store(LS_SAVER_PREFS, Json(&self.state.prefs));
    }

    fn finish_download(&mut self, file_name: String, result: Result<(), DownloadError>) {
        match result {
            Ok(()) => {
                self.state.error_message = None;
                self.state.last_download = Some(file_name);
            }
            Err(error) => {
                self.state.last_download = None;
                self.state.error_message = Some(error.to_string());
            }
        }
    }

    fn render_mime_select(&self, onchange: Callback<yew::html::ChangeData>) -> Html {
        let mime_type = &self.state.prefs.mime_type;
        let is_preset = MimePreset::iter().any(|preset| preset.to_string() == *mime_type);

        html! {
            <select class="inline" onchange=onchange>
                {
                    if is_preset {
                        html! {}
                    } else {
                        html! {<option value=mime_type selected=true>{mime_type}</option>}
                    }
                }
                {
                    for MimePreset::iter().map(|preset| {
                        let value = preset.to_string();
                        let selected = value == *mime_type;
                        html! {
                            <option value=value.clone() selected=selected>{value}</option>
                        }
                    })
                }
                <option value={"custom"}>{"Custom..."}</option>
            </select>
        }
    }
}
