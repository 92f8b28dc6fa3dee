//! The interpreted lesson component.
//!
//! Instantiation validates the component tree against what the runtime can
//! actually interpret; after that, rendering is a pure function of document
//! plus bound state, and `dispatch` is the only way state changes.

use crate::bindings::RuntimeBindings;
use comenius_core::{Action, Component, LessonDoc, QuizQuestion};
use comenius_error::{ComeniusResult, LoaderError, LoaderErrorKind};

/// A node in the rendered output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with a tag, attributes, and children
    Element {
        /// Element tag, e.g. `"p"` or `"button"`
        tag: &'static str,
        /// Attribute name/value pairs
        attrs: Vec<(&'static str, String)>,
        /// Child nodes in render order
        children: Vec<Node>,
    },
    /// A run of text
    Text(String),
}

impl Node {
    fn element(tag: &'static str, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            attrs: Vec::new(),
            children,
        }
    }

    fn with_attrs(tag: &'static str, attrs: Vec<(&'static str, String)>, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            attrs,
            children,
        }
    }

    fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

/// A live lesson: a validated document bound to its runtime.
#[derive(Debug)]
pub struct LessonComponent {
    doc: LessonDoc,
    bindings: RuntimeBindings,
}

impl LessonComponent {
    /// Bind a parsed document to a runtime, validating the tree first.
    pub fn instantiate(doc: LessonDoc, bindings: RuntimeBindings) -> ComeniusResult<Self> {
        validate_component(&doc.root)?;
        Ok(Self { doc, bindings })
    }

    /// The lesson title.
    pub fn title(&self) -> &str {
        &self.doc.title
    }

    /// The bound runtime state.
    pub fn bindings(&self) -> &RuntimeBindings {
        &self.bindings
    }

    /// Render the document against the current state.
    pub fn render(&self) -> Node {
        render_component(&self.doc.root, &self.bindings)
    }

    /// Apply an event action to the bound state.
    pub fn dispatch(&mut self, action: &Action) -> ComeniusResult<()> {
        match action {
            Action::Set { key, value } => {
                self.bindings.log(&format!("set {key}"));
                self.bindings.set(key, value.clone());
            }
            Action::Toggle { key } => {
                self.bindings.log(&format!("toggle {key}"));
                self.bindings.toggle(key);
            }
            Action::Increment { key, by } => {
                self.bindings.log(&format!("increment {key} by {by}"));
                self.bindings.increment(key, *by);
            }
            Action::SelectAnswer { question, option } => {
                let q = self.question(*question)?;
                if *option >= q.options.len() {
                    return Err(LoaderError::new(LoaderErrorKind::Interpretation(format!(
                        "option {option} out of range for question {question}"
                    )))
                    .into());
                }
                self.bindings.log(&format!("select {option} for question {question}"));
                self.bindings.select(*question, *option);
            }
            Action::RevealResult { question } => {
                self.question(*question)?;
                if self.bindings.selection(*question).is_none() {
                    return Err(LoaderError::new(LoaderErrorKind::Interpretation(format!(
                        "no selected option for question {question}"
                    )))
                    .into());
                }
                self.bindings.log(&format!("reveal question {question}"));
                self.bindings.reveal(*question);
            }
        }
        Ok(())
    }

    fn question(&self, id: u32) -> ComeniusResult<&QuizQuestion> {
        find_question(&self.doc.root, id).ok_or_else(|| {
            LoaderError::new(LoaderErrorKind::Interpretation(format!(
                "unknown quiz question {id}"
            )))
            .into()
        })
    }
}

/// Reject trees the runtime cannot meaningfully interpret.
fn validate_component(component: &Component) -> ComeniusResult<()> {
    match component {
        Component::Heading { text, .. } if text.trim().is_empty() => {
            Err(LoaderError::new(LoaderErrorKind::InvalidRoot("empty heading".to_string())).into())
        }
        Component::Heading { .. } | Component::Paragraph { .. } => Ok(()),
        Component::Section { children, .. } | Component::Conditional { children, .. } => {
            if children.is_empty() {
                return Err(LoaderError::new(LoaderErrorKind::InvalidRoot(
                    "empty child list".to_string(),
                ))
                .into());
            }
            children.iter().try_for_each(validate_component)
        }
        Component::List { items, .. } => {
            if items.is_empty() {
                return Err(
                    LoaderError::new(LoaderErrorKind::InvalidRoot("empty list".to_string())).into(),
                );
            }
            Ok(())
        }
        Component::Button { label, .. } => {
            if label.trim().is_empty() {
                return Err(LoaderError::new(LoaderErrorKind::InvalidRoot(
                    "unlabeled button".to_string(),
                ))
                .into());
            }
            Ok(())
        }
        Component::Quiz { questions } => {
            if questions.is_empty() {
                return Err(LoaderError::new(LoaderErrorKind::InvalidRoot(
                    "quiz with no questions".to_string(),
                ))
                .into());
            }
            for q in questions {
                if q.options.is_empty() || q.answer >= q.options.len() {
                    return Err(LoaderError::new(LoaderErrorKind::InvalidRoot(format!(
                        "question {} has no valid answer option",
                        q.id
                    )))
                    .into());
                }
            }
            Ok(())
        }
    }
}

fn find_question(component: &Component, id: u32) -> Option<&QuizQuestion> {
    match component {
        Component::Quiz { questions } => questions.iter().find(|q| q.id == id),
        Component::Section { children, .. } | Component::Conditional { children, .. } => {
            children.iter().find_map(|c| find_question(c, id))
        }
        _ => None,
    }
}

fn render_component(component: &Component, bindings: &RuntimeBindings) -> Node {
    match component {
        Component::Heading { level, text } => {
            let tag = match (*level).clamp(1, 6) {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            };
            Node::element(tag, vec![Node::text(text)])
        }
        Component::Paragraph { text } => Node::element("p", vec![Node::text(text)]),
        Component::Section { title, children } => {
            let mut nodes = Vec::with_capacity(children.len() + 1);
            if let Some(title) = title {
                nodes.push(Node::element("h2", vec![Node::text(title)]));
            }
            nodes.extend(children.iter().map(|c| render_component(c, bindings)));
            Node::with_attrs("section", vec![("class", "lesson-section".to_string())], nodes)
        }
        Component::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let items = items
                .iter()
                .map(|item| Node::element("li", vec![Node::text(item)]))
                .collect();
            Node::element(tag, items)
        }
        Component::Button { label, on_press } => {
            let action = serde_json::to_string(on_press).unwrap_or_default();
            Node::with_attrs(
                "button",
                vec![("data-action", action)],
                vec![Node::text(label)],
            )
        }
        Component::Conditional {
            when,
            equals,
            children,
        } => {
            if bindings.get(when) == equals {
                let nodes = children.iter().map(|c| render_component(c, bindings)).collect();
                Node::with_attrs("div", vec![("data-when", when.clone())], nodes)
            } else {
                Node::with_attrs("div", vec![("hidden", String::new())], Vec::new())
            }
        }
        Component::Quiz { questions } => {
            let nodes = questions.iter().map(|q| render_question(q, bindings)).collect();
            Node::with_attrs("div", vec![("class", "lesson-quiz".to_string())], nodes)
        }
    }
}

fn render_question(question: &QuizQuestion, bindings: &RuntimeBindings) -> Node {
    let selected = bindings.selection(question.id);
    let mut nodes = vec![Node::element("p", vec![Node::text(&question.prompt)])];

    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let mut attrs = vec![(
                "data-action",
                serde_json::to_string(&Action::SelectAnswer {
                    question: question.id,
                    option: i,
                })
                .unwrap_or_default(),
            )];
            if selected == Some(i) {
                attrs.push(("class", "selected".to_string()));
            }
            Node::with_attrs("li", attrs, vec![Node::text(option)])
        })
        .collect();
    nodes.push(Node::element("ul", options));

    if bindings.is_revealed(question.id) {
        if let Some(choice) = selected {
            let correct = choice == question.answer;
            let verdict = if correct { "Correct!" } else { "Incorrect." };
            let mut feedback = vec![Node::text(verdict)];
            if !correct {
                if let Some(answer) = question.options.get(question.answer) {
                    feedback.push(Node::text(format!(" The answer is {answer}.")));
                }
            }
            if let Some(explanation) = &question.explanation {
                feedback.push(Node::text(format!(" {explanation}")));
            }
            let class = if correct { "result correct" } else { "result incorrect" };
            nodes.push(Node::with_attrs("p", vec![("class", class.to_string())], feedback));
        }
    } else {
        nodes.push(Node::with_attrs(
            "button",
            vec![(
                "data-action",
                serde_json::to_string(&Action::RevealResult {
                    question: question.id,
                })
                .unwrap_or_default(),
            )],
            vec![Node::text("Check answer")],
        ));
    }

    Node::with_attrs(
        "div",
        vec![("data-question", question.id.to_string())],
        nodes,
    )
}
