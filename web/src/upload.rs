use fanmory_core as game;
use gloo::file::callbacks::{FileReader, read_as_data_url};
use gloo::file::File;
use web_sys::{FileList, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct UploadProps {
    pub preset: game::DifficultyPreset,
    pub on_done: Callback<Vec<game::ImageRef>>,
    pub on_back: Callback<()>,
}

pub(crate) enum Msg {
    Selected(Vec<File>),
    Loaded(Result<String, String>),
    Remove(usize),
    Done,
}

/// Lets the player pick their own images before a round.
pub(crate) struct UploadView {
    tray: game::ImageTray,
    /// Readers of the selection being loaded, dropping them aborts the reads.
    readers: Vec<FileReader>,
    loading: usize,
    batch: Vec<game::ImageRef>,
    notice: Option<String>,
}

/// Dropped files skip the input's `accept` filter, so non-images are filtered here.
fn is_image_type(mime: &str) -> bool {
    mime.starts_with("image/")
}

fn files_from(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(File::from)
        .filter(|file| {
            let keep = is_image_type(&file.raw_mime_type());
            if !keep {
                log::debug!("skipping {:?}, not an image", file.name());
            }
            keep
        })
        .collect()
}

impl UploadView {
    fn start_batch(&mut self, ctx: &Context<Self>, files: Vec<File>) -> bool {
        if self.loading > 0 {
            self.notice = Some("Still loading the previous selection".to_string());
            return true;
        }
        if files.len() > self.tray.remaining() {
            log::debug!(
                "selection of {} images does not fit in {} slots",
                files.len(),
                self.tray.remaining()
            );
            self.notice = Some(format!(
                "Only {} more images fit, nothing was added",
                self.tray.remaining()
            ));
            return true;
        }

        self.notice = None;
        self.loading = files.len();
        self.readers = files
            .iter()
            .map(|file| {
                let link = ctx.link().clone();
                read_as_data_url(file, move |result| {
                    link.send_message(Msg::Loaded(result.map_err(|err| err.to_string())))
                })
            })
            .collect();
        true
    }

    fn finish_one(&mut self, result: Result<String, String>) -> bool {
        match result {
            Ok(data_url) => self.batch.push(game::ImageRef::new(data_url)),
            Err(err) => log::error!("Could not read image: {}", err),
        }
        self.loading = self.loading.saturating_sub(1);
        if self.loading > 0 {
            return false;
        }

        self.readers.clear();
        let batch = std::mem::take(&mut self.batch);
        match self.tray.add_batch(batch) {
            game::TrayBatch::Added { duplicates: 0, .. } => {}
            game::TrayBatch::Added { duplicates, .. } => {
                self.notice = Some(format!("Skipped {} duplicate images", duplicates));
            }
            game::TrayBatch::Rejected { remaining } => {
                self.notice = Some(format!(
                    "Only {} more images fit, nothing was added",
                    remaining
                ));
            }
        }
        true
    }
}

impl Component for UploadView {
    type Message = Msg;
    type Properties = UploadProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            tray: game::ImageTray::for_preset(ctx.props().preset),
            readers: Vec::new(),
            loading: 0,
            batch: Vec::new(),
            notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Selected(files) if files.is_empty() => false,
            Selected(files) => self.start_batch(ctx, files),
            Loaded(result) => self.finish_one(result),
            Remove(index) => {
                self.notice = None;
                self.tray.remove(index).is_some()
            }
            Done => {
                if self.tray.is_empty() || self.loading > 0 {
                    return false;
                }
                ctx.props().on_done.emit(self.tray.images().to_vec());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let capacity = self.tray.capacity();
        let remaining = self.tray.remaining();

        let onchange = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let files = files_from(input.files());
            // so picking the same files again still fires a change
            input.set_value("");
            Msg::Selected(files)
        });
        let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
        let ondrop = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::Selected(files_from(e.data_transfer().and_then(|dt| dt.files())))
        });
        let on_done = link.callback(|_: MouseEvent| Msg::Done);
        let on_back = ctx.props().on_back.reform(|_: MouseEvent| ());

        html! {
            <section class="upload">
                <h2>{"Choose your own images"}</h2>
                <p class="count">
                    {format!("Selected: {}/{}", self.tray.len(), capacity)}
                    if remaining > 0 {
                        {format!(" ({} more allowed)", remaining)}
                    }
                </p>
                if !self.tray.is_empty() {
                    <div class="previews">
                        {
                            for self.tray.images().iter().enumerate().map(|(index, image)| {
                                let onclick = link.callback(move |_: MouseEvent| Msg::Remove(index));
                                html! {
                                    <figure class="preview">
                                        <img src={image.as_str().to_string()} alt={format!("image {}", index + 1)}/>
                                        <button class="remove" {onclick}>{"×"}</button>
                                    </figure>
                                }
                            })
                        }
                    </div>
                }
                <label class={classes!("drop", (remaining == 0).then_some("full"))} {ondragover} {ondrop}>
                    <span>{"Drop images here or click to pick them, several at once is fine"}</span>
                    <input type="file" accept="image/*" multiple={true} disabled={remaining == 0} {onchange}/>
                </label>
                if self.loading > 0 {
                    <p class="notice">{format!("Loading {} images…", self.loading)}</p>
                }
                if let Some(notice) = &self.notice {
                    <p class="notice">{notice.clone()}</p>
                }
                <p class="hint">{"Add at least one image, the rest of the deck is filled with default cards."}</p>
                <nav>
                    <button class="back" onclick={on_back}>{"Back"}</button>
                    <button class="primary" onclick={on_done} disabled={self.tray.is_empty() || self.loading > 0}>
                        {"Next"}
                    </button>
                </nav>
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_images_are_taken_from_a_drop() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/svg+xml"));
        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type(""));
        assert!(files_from(None).is_empty());
    }
}
