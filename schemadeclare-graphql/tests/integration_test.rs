//! Integration tests for schemadeclare-graphql

use schemadeclare_core::Provider;
use schemadeclare_graphql::async_graphql::dynamic::{Enum, InputObject, InputValue};
use schemadeclare_graphql::*;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("account {0} not found")]
struct AccountNotFound(i32);

struct AccountController {
    balance: AtomicI32,
}

impl Controller for AccountController {}
impl Provider for AccountController {}

#[derive(Default)]
struct GreetingController;

impl Controller for GreetingController {
    fn construct() -> Option<Self> {
        Some(GreetingController)
    }
}

impl Provider for GreetingController {}

fn greet() -> FieldDescriptor {
    FieldDescriptor::synchronous(
        "greet",
        TypeRef::named_nn(TypeRef::STRING),
        |_: &GreetingController, args: &BoundArguments| -> Result<String, HandlerError> {
            Ok(format!("Hello, {}", args.get::<String>(0)?))
        },
    )
    .param(
        ParameterDescriptor::new("Name", TypeRef::named(TypeRef::STRING)).with_default("stranger"),
    )
}

fn add() -> FieldDescriptor {
    FieldDescriptor::synchronous(
        "add",
        TypeRef::named_nn(TypeRef::INT),
        |_: &GreetingController, args: &BoundArguments| -> Result<i32, HandlerError> {
            Ok(args.get::<i32>(0)? + args.get::<i32>(1)?)
        },
    )
    .param(ParameterDescriptor::new("A", TypeRef::named_nn(TypeRef::INT)))
    .param(ParameterDescriptor::new("B", TypeRef::named_nn(TypeRef::INT)))
}

fn balance() -> FieldDescriptor {
    FieldDescriptor::asynchronous(
        "balance",
        TypeRef::named_nn(TypeRef::INT),
        |accounts: Arc<AccountController>, args: BoundArguments| async move {
            let account_id = args.get::<i32>(0)?;
            if account_id != 1 {
                return Err(HandlerError::from(AccountNotFound(account_id)));
            }
            Ok::<_, HandlerError>(accounts.balance.load(Ordering::SeqCst))
        },
    )
    .param(ParameterDescriptor::new("AccountId", TypeRef::named_nn(TypeRef::INT)))
}

fn deposit() -> FieldDescriptor {
    FieldDescriptor::synchronous(
        "deposit",
        TypeRef::named_nn(TypeRef::INT),
        |accounts: &AccountController, args: &BoundArguments| -> Result<i32, HandlerError> {
            let amount = args.get::<i32>(0)?;
            Ok(accounts.balance.fetch_add(amount, Ordering::SeqCst) + amount)
        },
    )
    .param(ParameterDescriptor::new("Amount", TypeRef::named_nn(TypeRef::INT)))
    .description("Add funds and return the new balance")
}

fn accounts_schema() -> DeclaredSchema {
    let container = Container::new();
    container.register(AccountController {
        balance: AtomicI32::new(100),
    });
    container.register(GreetingController);

    SchemaDeclaration::new(InstanceProvider::resolver(container))
        .query(balance())
        .query(greet())
        .mutation(deposit())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_default_construct_query() {
    let schema = SchemaDeclaration::new(InstanceProvider::DefaultConstruct)
        .query(add())
        .query(greet())
        .build()
        .unwrap();

    let response = schema
        .execute(GraphQLRequest::new("{ add(a: 3, b: 4) greet }"))
        .await;

    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(
        response.data,
        Some(json!({"add": 7, "greet": "Hello, stranger"}))
    );
}

#[tokio::test]
async fn test_supplied_argument_overrides_default() {
    let response = accounts_schema()
        .execute(GraphQLRequest::new(r#"{ greet(name: "Ada") }"#))
        .await;

    assert_eq!(response.data, Some(json!({"greet": "Hello, Ada"})));
}

#[tokio::test]
async fn test_async_field_with_variables() {
    let request = GraphQLRequest::new("query Balance($id: Int!) { balance(accountId: $id) }")
        .with_variables(json!({"id": 1}))
        .with_operation("Balance");

    let response = accounts_schema().execute(request).await;
    assert_eq!(response.data, Some(json!({"balance": 100})));
}

#[tokio::test]
async fn test_handler_error_message_reaches_caller() {
    let response = accounts_schema()
        .execute(GraphQLRequest::new("{ balance(accountId: 9) }"))
        .await;

    assert_eq!(response.errors, vec!["account 9 not found".to_string()]);
}

#[tokio::test]
async fn test_mutation_uses_container_singleton() {
    let schema = accounts_schema();

    let response = schema
        .execute(GraphQLRequest::new("mutation { deposit(amount: 25) }"))
        .await;
    assert_eq!(response.data, Some(json!({"deposit": 125})));

    let response = schema
        .execute(GraphQLRequest::new("{ balance(accountId: 1) }"))
        .await;
    assert_eq!(response.data, Some(json!({"balance": 125})));
}

#[tokio::test]
async fn test_unregistered_controller_is_a_resolution_error() {
    let schema = SchemaDeclaration::new(InstanceProvider::resolver(Container::new()))
        .query(greet())
        .build()
        .unwrap();

    let response = schema.execute(GraphQLRequest::new("{ greet }")).await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].contains("GreetingController"));
}

#[tokio::test]
async fn test_verbatim_naming_from_config() {
    let config = GraphQLConfig::new().with_naming(NamingConvention::Verbatim);
    let schema = SchemaDeclaration::with_config(InstanceProvider::DefaultConstruct, config)
        .query(add())
        .build()
        .unwrap();

    assert!(schema.sdl().contains("add(A: Int!, B: Int!): Int!"));

    let response = schema
        .execute(GraphQLRequest::new("{ add(A: 1, B: 2) }"))
        .await;
    assert_eq!(response.data, Some(json!({"add": 3})));
}

#[tokio::test]
async fn test_introspection_disabled() {
    let config = GraphQLConfig::production();
    let schema = SchemaDeclaration::with_config(InstanceProvider::DefaultConstruct, config)
        .query(greet())
        .build()
        .unwrap();

    let response = schema
        .execute(GraphQLRequest::new("{ __schema { queryType { name } } }"))
        .await;
    assert_ne!(
        response.data,
        Some(json!({"__schema": {"queryType": {"name": "Query"}}}))
    );
}

#[tokio::test]
async fn test_depth_limit() {
    let config = GraphQLConfig::new().with_max_depth(1);
    let schema = SchemaDeclaration::with_config(InstanceProvider::DefaultConstruct, config)
        .query(greet())
        .build()
        .unwrap();

    let response = schema.execute(GraphQLRequest::new("{ greet }")).await;
    assert!(response.is_ok(), "{:?}", response.errors);

    let response = schema
        .execute(GraphQLRequest::new("{ __schema { queryType { name } } }"))
        .await;
    assert!(!response.is_ok());
}

#[test]
fn test_sdl_exports_descriptions_and_defaults() {
    let sdl = accounts_schema().sdl();

    assert!(sdl.contains("greet(name: String = \"stranger\"): String!"));
    assert!(sdl.contains("Add funds and return the new balance"));
    assert!(sdl.contains("type Mutation"));
}

fn paint() -> FieldDescriptor {
    FieldDescriptor::synchronous(
        "paint",
        TypeRef::named_nn(TypeRef::STRING),
        |_: &GreetingController, args: &BoundArguments| -> Result<String, HandlerError> {
            let color = args.get::<String>(0)?;
            let (min, max) = match args.raw(1) {
                Some(Value::Object(range)) => (
                    range.get("min").cloned().unwrap_or(Value::Null),
                    range.get("max").cloned().unwrap_or(Value::Null),
                ),
                _ => (Value::Null, Value::Null),
            };
            Ok(format!("{color} {min}..{max}"))
        },
    )
    .param(ParameterDescriptor::new("Color", TypeRef::named_nn("Color")))
    .param(ParameterDescriptor::new("Range", TypeRef::named("Range")))
}

fn paint_schema() -> DeclaredSchema {
    SchemaDeclaration::new(InstanceProvider::DefaultConstruct)
        .register(Enum::new("Color").item("RED").item("GREEN"))
        .register(
            InputObject::new("Range")
                .field(InputValue::new("min", TypeRef::named_nn(TypeRef::INT)))
                .field(InputValue::new("max", TypeRef::named_nn(TypeRef::INT))),
        )
        .query(paint())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_enum_and_input_object_arguments() {
    let response = paint_schema()
        .execute(GraphQLRequest::new(
            "{ paint(color: GREEN, range: { min: 1, max: 3 }) }",
        ))
        .await;

    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({"paint": "GREEN 1..3"})));
}

#[tokio::test]
async fn test_enum_argument_from_variables() {
    let request = GraphQLRequest::new("query Paint($c: Color!) { paint(color: $c) }")
        .with_variables(json!({"c": "RED"}));

    let response = paint_schema().execute(request).await;
    assert_eq!(response.data, Some(json!({"paint": "RED null..null"})));
}
