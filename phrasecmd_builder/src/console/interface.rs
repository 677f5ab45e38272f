#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Column widths are always at least this wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Width(usize);

impl Width {
    /// `width`, raised to `minimum` when narrower.
    pub(crate) fn at_least(width: usize, minimum: usize) -> Self {
        Width(std::cmp::max(width, minimum))
    }
}

// Stay under the full terminal width, so the renderer never touches the final column.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_RIGHT_WIDTH: usize = 17;

/// Renders `left   right` rows, wrapping the right column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: Width,
    left: Width,
    right: Width,
}

impl ColumnRenderer {
    /// A renderer which fits the terminal, when possible.
    pub(crate) fn guided(padding: Width, left: Width, right: Width, total_width: usize) -> Self {
        let non_right = left.0 + padding.0;
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_right = std::cmp::max(right.0, MINIMUM_RIGHT_WIDTH);

        if guided_right + non_right <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Left column {non_right} and right column fit within the target total {target_total_width}.  Selecting right: {guided_right}.");
            }

            Self::new(padding, left, Width(guided_right))
        } else if non_right < target_total_width {
            let calculated_right =
                std::cmp::max(target_total_width - non_right, MINIMUM_RIGHT_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Left column {non_right} fits within the target total {target_total_width}.  Selecting right: {calculated_right}.");
            }

            Self::new(padding, left, Width(calculated_right))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Left column {non_right} does not fit within the total {total_width}.  Selecting right: {MINIMUM_RIGHT_WIDTH}.");
            }

            Self::new(padding, left, Width(MINIMUM_RIGHT_WIDTH))
        }
    }

    pub(crate) fn new(padding: Width, left: Width, right: Width) -> Self {
        Self {
            padding,
            left,
            right,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, right: &str) -> Vec<String> {
        let padding = self.padding.0;
        let left_width = self.left.0;
        let parts = chunk(right, self.right.0);

        if parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    format!("{:indent$}{left:left_width$}{:padding$}{part}", "", "")
                } else {
                    format!("{:indent$}{:left_width$}{:padding$}{part}", "", "", "")
                }
            })
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let word_length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word_length + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = std::cmp::max(width, 2) - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(characters[left..].iter());
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: String) {
        eprintln!("{error}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::console::UserInterface;
    use std::cell::RefCell;
    use std::sync::mpsc;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, error: String) {
            self.errors.borrow_mut().push(error);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<String>) {
            let InMemoryInterface { messages, errors } = self;
            (join(messages.into_inner()), join(errors.into_inner()))
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error) = self.consume();
            assert_eq!(error, None);
            message.unwrap()
        }
    }

    /// An interface which may be moved into a `Tool`, while the test keeps the receiving side.
    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        (
            SenderInterface {
                message_tx,
                error_tx,
            },
            ReceiverInterface {
                message_rx,
                error_rx,
            },
        )
    }

    pub(crate) struct SenderInterface {
        message_tx: mpsc::Sender<String>,
        error_tx: mpsc::Sender<String>,
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            self.message_tx.send(message).unwrap();
        }

        fn print_error(&self, error: String) {
            self.error_tx.send(error).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        message_rx: mpsc::Receiver<String>,
        error_rx: mpsc::Receiver<String>,
    }

    impl ReceiverInterface {
        /// Take everything sent so far.
        pub(crate) fn consume(&self) -> (Option<String>, Option<String>) {
            (
                join(self.message_rx.try_iter().collect()),
                join(self.error_rx.try_iter().collect()),
            )
        }

        pub(crate) fn consume_message(&self) -> String {
            let (message, error) = self.consume();
            assert_eq!(error, None);
            message.unwrap()
        }

        pub(crate) fn consume_error(&self) -> String {
            let (message, error) = self.consume();
            assert_eq!(message, None);
            error.unwrap()
        }
    }

    fn join(values: Vec<String>) -> Option<String> {
        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }
}
