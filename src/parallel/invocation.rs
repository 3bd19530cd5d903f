use super::core::{MapOptions, ParallelMap};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Named arguments of an [`Invocation`]
pub type Kwargs = Map<String, Value>;

/// One call of a [`Callable`]: either positional or named arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Positional(Vec<Value>),
    Keyword(Kwargs),
}

impl Invocation {
    pub fn positional<I: IntoIterator<Item = Value>>(args: I) -> Self {
        Invocation::Positional(args.into_iter().collect())
    }

    pub fn keyword<K, I>(kwargs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Invocation::Keyword(kwargs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Route the arguments to the matching method of `func`
    pub fn dispatch<C: Callable + ?Sized>(self, func: &C) -> anyhow::Result<C::Output> {
        match self {
            Invocation::Positional(args) => func.call_positional(args),
            Invocation::Keyword(kwargs) => func.call_keyword(kwargs),
        }
    }
}

impl From<Vec<Value>> for Invocation {
    fn from(args: Vec<Value>) -> Self {
        Invocation::Positional(args)
    }
}

impl From<Kwargs> for Invocation {
    fn from(kwargs: Kwargs) -> Self {
        Invocation::Keyword(kwargs)
    }
}

/// JSON arrays become positional calls, objects keyword calls
impl TryFrom<Value> for Invocation {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(args) => Ok(Invocation::Positional(args)),
            Value::Object(kwargs) => Ok(Invocation::Keyword(kwargs)),
            other => Err(Error::invalid_argument(format!(
                "invocation arguments must be an array or an object, got {other}"
            ))),
        }
    }
}

/// A function that accepts either calling convention
pub trait Callable: Sync {
    type Output: Send;

    fn call_positional(&self, args: Vec<Value>) -> anyhow::Result<Self::Output>;

    fn call_keyword(&self, kwargs: Kwargs) -> anyhow::Result<Self::Output>;
}

/// Call `func` once per entry of `args_list` on a pool of `pool_size` worker
/// threads while a progress bar tracks completed calls.
///
/// `results[i]` is the outcome of `args_list[i]`.
pub fn map_with_progress<C>(
    func: &C,
    args_list: Vec<Invocation>,
    pool_size: usize,
) -> Result<Vec<C::Output>>
where
    C: Callable + ?Sized,
{
    let options = MapOptions {
        pool_size,
        ..MapOptions::default()
    };
    ParallelMap::new(options).run(args_list, |invocation| invocation.dispatch(func))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Describe;

    impl Callable for Describe {
        type Output = String;

        fn call_positional(&self, args: Vec<Value>) -> anyhow::Result<String> {
            Ok(format!("positional:{}", args.len()))
        }

        fn call_keyword(&self, kwargs: Kwargs) -> anyhow::Result<String> {
            let mut keys: Vec<_> = kwargs.keys().cloned().collect();
            keys.sort();
            Ok(format!("keyword:{}", keys.join(",")))
        }
    }

    #[test]
    fn test_dispatch_by_variant() {
        let positional = Invocation::positional([json!(1), json!(2)]);
        let keyword = Invocation::keyword([("b", json!(1)), ("a", json!(2))]);

        assert_eq!(positional.dispatch(&Describe).unwrap(), "positional:2");
        assert_eq!(keyword.dispatch(&Describe).unwrap(), "keyword:a,b");
    }

    #[test]
    fn test_try_from_json() {
        assert!(matches!(
            Invocation::try_from(json!([1, "x"])),
            Ok(Invocation::Positional(args)) if args.len() == 2
        ));
        assert!(matches!(
            Invocation::try_from(json!({"x": 1})),
            Ok(Invocation::Keyword(kwargs)) if kwargs.contains_key("x")
        ));
        assert!(matches!(
            Invocation::try_from(json!(5)),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_map_mixed_invocations() {
        let args = vec![
            Invocation::positional([json!(1)]),
            Invocation::keyword([("k", json!(true))]),
            Invocation::positional(Vec::new()),
        ];

        let results = map_with_progress(&Describe, args, 2).unwrap();

        assert_eq!(results, vec!["positional:1", "keyword:k", "positional:0"]);
    }
}
