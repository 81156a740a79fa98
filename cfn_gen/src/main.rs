use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::Write;

#[derive(Debug, Serialize, Deserialize)]
struct Parameters {
    bucket_name: String,
    function_name: String,
    architecture: String,
    memory_size: u16,
    timeout: u16,
    log_retention_in_days: u16,
    api_path: String,
    #[serde(default)]
    rates_file: Option<String>,
    #[serde(default)]
    rates_bucket: Option<String>,
    #[serde(default)]
    rates_key: Option<String>,
}

fn main() -> Result<()> {
    let parameters = load_parameters("parameters.yml")?;
    let cfn = build_cloudformation(&parameters)?;
    create_template_file("template.yml", &cfn)?;

    Ok(())
}

fn load_parameters(path: &str) -> Result<Parameters> {
    let parameters = fs::read_to_string(path)?;
    let parameters: Parameters = serde_yaml::from_str(&parameters)?;

    Ok(parameters)
}

fn build_cloudformation(parameters: &Parameters) -> Result<String> {
    let environment = rate_environment(parameters)?;
    let mut builder = String::new();

    // Setup the template
    builder.push_str(&format!(
        r#"---
AWSTemplateFormatVersion: 2010-09-09
Transform: AWS::Serverless-2016-10-31
Description: Currency Converter
Globals:
  Function:
    Timeout: {}
    MemorySize: {}
    CodeUri:
      Bucket: {}"#,
        &parameters.timeout, &parameters.memory_size, &parameters.bucket_name
    ));

    builder.push_str(
        "
Resources:",
    );

    // IAM Role
    builder.push_str(
        r#"
  RoleCurrencyConverter:
    Type: AWS::IAM::Role
    Properties:
      RoleName: !Sub "iam-${AWS::Region}-currency-converter-role"
      Path: /
      AssumeRolePolicyDocument:
        Version: 2012-10-17
        Statement:
          - Effect: Allow
            Principal:
              Service: lambda.amazonaws.com
            Action: sts:AssumeRole
      ManagedPolicyArns: [arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole]"#,
    );

    if let RateEnvironment::S3 { bucket, key } = &environment {
        builder.push_str(&format!(
            r#"
      Policies:
        - PolicyName: !Sub "iam-${{AWS::Region}}-currency-converter-policy"
          PolicyDocument:
            Version: 2012-10-17
            Statement:
              - Effect: Allow
                Action:
                  - s3:GetObject
                Resource: arn:aws:s3:::{}/{}"#,
            bucket, key
        ));
    }

    // Function
    builder.push_str(&format!(
        r#"
  LambdaCurrencyConverter:
    Type: AWS::Serverless::Function
    Properties:
      FunctionName: {}
      Description: Currency Converter | {}
      Runtime: provided.al2
      Architectures: [{}]
      Handler: bootstrap
      Role: !GetAtt RoleCurrencyConverter.Arn
      CodeUri:
        Key: {}.zip
      Environment:
        Variables:"#,
        &parameters.function_name,
        &parameters.architecture,
        &parameters.architecture,
        &parameters.function_name
    ));

    match &environment {
        RateEnvironment::File(path) => builder.push_str(&format!(
            r#"
          RATES_FILE: {}"#,
            path
        )),
        RateEnvironment::S3 { bucket, key } => builder.push_str(&format!(
            r#"
          RATES_BUCKET: {}
          RATES_KEY: {}"#,
            bucket, key
        )),
    }

    builder.push_str(&format!(
        r#"
      Events:
        Convert:
          Type: HttpApi
          Properties:
            Path: {}
            Method: GET"#,
        &parameters.api_path
    ));

    // Log group
    builder.push_str(&format!(
        r#"
  LogsCurrencyConverter:
    Type: AWS::Logs::LogGroup
    Properties:
      LogGroupName: /aws/lambda/{}
      RetentionInDays: {}"#,
        &parameters.function_name, &parameters.log_retention_in_days
    ));

    builder.push_str(
        r#"
Outputs:
  ApiUrl:
    Value: !Sub "https://${ServerlessHttpApi}.execute-api.${AWS::Region}.amazonaws.com""#,
    );
    builder.push('\n');

    Ok(builder)
}

enum RateEnvironment<'a> {
    File(&'a str),
    S3 { bucket: &'a str, key: &'a str },
}

fn rate_environment(parameters: &Parameters) -> Result<RateEnvironment<'_>> {
    if let Some(path) = parameters.rates_file.as_deref() {
        return Ok(RateEnvironment::File(path));
    }

    match (
        parameters.rates_bucket.as_deref(),
        parameters.rates_key.as_deref(),
    ) {
        (Some(bucket), Some(key)) => Ok(RateEnvironment::S3 { bucket, key }),
        _ => bail!("parameters.yml needs rates_file, or rates_bucket and rates_key"),
    }
}

fn create_template_file(path: &str, content: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
